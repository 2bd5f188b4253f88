//! Synthetic scatter generator.
//!
//! Vehicles are placed uniformly on the integer grid `[0, grid)²` with a
//! normally distributed charge.  Depots sit on a regular lattice with
//! spacing `grid / √n`, offset by half a cell.  When `n` is not a perfect
//! square the last lattice rows can overshoot the grid; those coordinates
//! are pulled back to `grid - 1`.

use cr_core::{Bounds, SimRng};
use tracing::debug;

use crate::{DepotRecord, Scatter, ScatterError, ScatterResult, VehicleRecord};

/// Generator inputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScatterParams {
    /// Side length of the square area.
    pub grid:           u32,
    pub vehicle_count:  usize,
    pub depot_count:    usize,
    /// Mean of the charge distribution, in percent.
    pub avg_charge:     f64,
    pub charge_std_dev: f64,
    /// Packs stocked at every depot.
    pub depot_capacity: u32,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            grid:           1000,
            vehicle_count:  150,
            depot_count:    20,
            avg_charge:     45.0,
            charge_std_dev: 10.0,
            depot_capacity: 10,
        }
    }
}

impl ScatterParams {
    /// The area every generated record lies in.
    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.grid as f64)
    }

    pub fn validate(&self) -> ScatterResult<()> {
        if self.grid == 0 || self.grid > i32::MAX as u32 {
            return Err(ScatterError::Params(format!("grid {} is out of range", self.grid)));
        }
        if !self.avg_charge.is_finite() || !self.charge_std_dev.is_finite() || self.charge_std_dev < 0.0 {
            return Err(ScatterError::Params(format!(
                "charge distribution N({}, {}) is not usable",
                self.avg_charge, self.charge_std_dev
            )));
        }
        if self.depot_capacity == 0 {
            return Err(ScatterError::Params("depot capacity must be at least 1".into()));
        }
        Ok(())
    }
}

/// Generate a scatter from `params`, drawing every random number from `rng`.
pub fn generate_scatter(params: &ScatterParams, rng: &mut SimRng) -> ScatterResult<Scatter> {
    params.validate()?;
    let grid = params.grid as i32;

    let vehicles = (0..params.vehicle_count)
        .map(|_| {
            let x = rng.gen_range(0..grid);
            let y = rng.gen_range(0..grid);
            let charge = rng.normal(params.avg_charge, params.charge_std_dev).clamp(0.0, 100.0);
            // Float-to-int `as` truncates toward zero.
            VehicleRecord { x, y, charge: charge as u8 }
        })
        .collect();

    let depots = lattice(params.grid, params.depot_count)
        .map(|(x, y)| DepotRecord { x, y, capacity: params.depot_capacity })
        .collect();

    let scatter = Scatter { vehicles, depots };
    debug!(
        vehicles = scatter.vehicles.len(),
        depots = scatter.depots.len(),
        grid = params.grid,
        "generated scatter"
    );
    Ok(scatter)
}

/// Depot lattice positions for `n` depots on a `grid`-sided square.
fn lattice(grid: u32, n: usize) -> impl Iterator<Item = (i32, i32)> {
    let root = (n as f64).sqrt();
    let step = grid as f64 / root;
    let max = grid as i32 - 1;
    (0..n).map(move |i| {
        let i = i as f64;
        let col = i % root;
        let row = (i / root).floor();
        let x = (col * step + step / 2.0) as i32;
        let y = (row * step + step / 2.0) as i32;
        (x.min(max), y.min(max))
    })
}

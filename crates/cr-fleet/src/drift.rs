//! Ambient fleet usage between charger moves.
//!
//! Each step a handful of unreserved vehicles are ridden somewhere else: they
//! jump to a uniform random position and lose charge in proportion to the
//! distance covered.  This can push a vehicle under the service threshold or
//! move a candidate away from the charger.

use cr_core::{Bounds, SimConfig, SimRng, VehicleId};
use tracing::trace;

use crate::Vehicle;

/// Parameters of the ambient drift.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DriftParams {
    /// Vehicles relocated per call (fewer if fewer are unreserved).
    pub sample_size: usize,
    /// Relocation targets are drawn from this rectangle.
    pub bounds:      Bounds,
    /// Charge lost per unit of distance moved.
    pub decay_rate:  f64,
}

impl DriftParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            sample_size: config.perturb_sample_size,
            bounds:      config.bounds,
            decay_rate:  config.charge_decay_rate,
        }
    }
}

/// Relocate `min(sample_size, #unreserved)` unreserved vehicles.
///
/// Vehicles are picked uniformly without replacement from the unreserved
/// set; reserved vehicles are never touched.  Returns the ids of the moved
/// vehicles in the order they were drawn.
pub fn perturb(vehicles: &mut [Vehicle], params: &DriftParams, rng: &mut SimRng) -> Vec<VehicleId> {
    if params.sample_size == 0 {
        return Vec::new();
    }

    let movable: Vec<usize> = vehicles
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_reserved())
        .map(|(i, _)| i)
        .collect();

    let picks = rng.sample_indices(movable.len(), params.sample_size);
    let mut moved = Vec::with_capacity(picks.len());

    for pick in picks {
        let vehicle = &mut vehicles[movable[pick]];
        let target = rng.point_in(&params.bounds);
        let dist = vehicle.relocate(target, params.decay_rate);
        trace!(vehicle = %vehicle.id(), dist, charge = vehicle.charge(), "vehicle drifted");
        moved.push(vehicle.id());
    }

    moved
}

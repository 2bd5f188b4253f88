//! Fluent builder producing a validated [`Fleet`].
//!
//! # Usage
//!
//! ```rust
//! use cr_core::{Bounds, Point};
//! use cr_fleet::FleetBuilder;
//!
//! let fleet = FleetBuilder::new(Bounds::square(1000.0))
//!     .vehicle(Point::new(100.0, 0.0), 10.0)
//!     .depot(Point::new(0.0, 0.0), 10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(fleet.vehicles.len(), 1);
//! assert_eq!(fleet.depots[0].charged(), 10);
//! ```

use cr_core::{Bounds, DepotId, Point, VehicleId};

use crate::{Depot, FULL_CHARGE, FleetError, FleetResult, Vehicle};

/// All vehicles and depots of one run, in enumeration order.
///
/// `vehicles[i].id() == VehicleId(i)` and likewise for depots.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    pub vehicles: Vec<Vehicle>,
    pub depots:   Vec<Depot>,
}

/// Collects raw initial records and validates them in [`build`](Self::build).
///
/// Nothing is checked until `build`, so loaders can push records in any
/// order and get the first problem reported with its index.
pub struct FleetBuilder {
    bounds:   Bounds,
    vehicles: Vec<(Point, f64)>,
    depots:   Vec<(Point, u32)>,
}

impl FleetBuilder {
    /// Start an empty fleet whose entities must lie inside `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            vehicles: Vec::new(),
            depots:   Vec::new(),
        }
    }

    /// Add a vehicle at `position` with `charge` percent.
    pub fn vehicle(mut self, position: Point, charge: f64) -> Self {
        self.vehicles.push((position, charge));
        self
    }

    /// Add a depot at `position` stocked with `capacity` charged packs.
    pub fn depot(mut self, position: Point, capacity: u32) -> Self {
        self.depots.push((position, capacity));
        self
    }

    /// Add many vehicles at once.
    pub fn vehicles<I: IntoIterator<Item = (Point, f64)>>(mut self, records: I) -> Self {
        self.vehicles.extend(records);
        self
    }

    /// Add many depots at once.
    pub fn depots<I: IntoIterator<Item = (Point, u32)>>(mut self, records: I) -> Self {
        self.depots.extend(records);
        self
    }

    /// Validate every record and assign ids in insertion order.
    pub fn build(self) -> FleetResult<Fleet> {
        if u32::try_from(self.vehicles.len()).is_err() {
            return Err(FleetError::TooMany("vehicles"));
        }
        if u32::try_from(self.depots.len()).is_err() {
            return Err(FleetError::TooMany("depots"));
        }

        let mut vehicles = Vec::with_capacity(self.vehicles.len());
        for (i, &(position, charge)) in self.vehicles.iter().enumerate() {
            let id = VehicleId(i as u32);
            check_position(&self.bounds, "vehicle", i, position)?;
            if !(0.0..=FULL_CHARGE).contains(&charge) {
                return Err(FleetError::InvalidCharge { vehicle: id, charge });
            }
            vehicles.push(Vehicle::new(id, position, charge));
        }

        let mut depots = Vec::with_capacity(self.depots.len());
        for (i, &(position, capacity)) in self.depots.iter().enumerate() {
            let id = DepotId(i as u32);
            check_position(&self.bounds, "depot", i, position)?;
            if capacity == 0 {
                return Err(FleetError::ZeroCapacity(id));
            }
            depots.push(Depot::new(id, position, capacity));
        }

        Ok(Fleet { vehicles, depots })
    }
}

fn check_position(bounds: &Bounds, what: &'static str, index: usize, p: Point) -> FleetResult<()> {
    if !p.is_finite() {
        return Err(FleetError::NonFinitePosition { what, index });
    }
    if !bounds.contains(p) {
        return Err(FleetError::OutOfBounds { what, index, x: p.x, y: p.y });
    }
    Ok(())
}

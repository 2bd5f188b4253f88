//! Raw scatter records and their conversion into a validated [`Fleet`].

use cr_core::{Bounds, Point};
use cr_fleet::{Fleet, FleetBuilder};

use crate::ScatterResult;

/// One vehicle as stored on disk: integer grid position and whole-percent
/// charge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRecord {
    pub x:      i32,
    pub y:      i32,
    pub charge: u8,
}

/// One depot.  `capacity` is not part of the file format.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepotRecord {
    pub x:        i32,
    pub y:        i32,
    pub capacity: u32,
}

impl VehicleRecord {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

impl DepotRecord {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// Everything read from (or written to) one scatter file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scatter {
    pub vehicles: Vec<VehicleRecord>,
    pub depots:   Vec<DepotRecord>,
}

impl Scatter {
    /// Validate the records against `bounds` and assign ids in file order.
    ///
    /// Charges above 100 and depots with no packs are rejected by
    /// [`FleetBuilder::build`].
    pub fn into_fleet(self, bounds: Bounds) -> ScatterResult<Fleet> {
        let fleet = FleetBuilder::new(bounds)
            .vehicles(self.vehicles.iter().map(|v| (v.position(), v.charge as f64)))
            .depots(self.depots.iter().map(|d| (d.position(), d.capacity)))
            .build()?;
        Ok(fleet)
    }
}

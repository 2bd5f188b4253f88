//! The `DispatchPolicy` trait: the driver's target-selection seam.

use cr_core::{DepotId, Point, SimConfig, VehicleId};
use cr_fleet::{Depot, Vehicle};

use crate::{DepotIndex, DispatchError, DispatchResult, nearest_vehicles};

/// Chooses where the charger goes next.
///
/// Both methods are pure reads over the current fleet state; the driver
/// calls them afresh every step because drift changes eligibility and
/// distances.
pub trait DispatchPolicy {
    /// Depot to refill at.  [`DispatchError::NoCandidate`] when none is left.
    fn select_depot(&self, from: Point, depots: &[Depot]) -> DispatchResult<DepotId>;

    /// Serviceable vehicles, best first.  May be empty.
    fn rank_vehicles(&self, from: Point, vehicles: &[Vehicle]) -> Vec<VehicleId>;
}

/// Nearest-neighbour policy: closest unvisited depot, closest low-charge
/// vehicles.
pub struct GreedyPolicy {
    index:           DepotIndex,
    threshold:       f64,
    candidate_limit: usize,
}

impl GreedyPolicy {
    pub fn new(depots: &[Depot], threshold: f64, candidate_limit: usize) -> Self {
        Self { index: DepotIndex::new(depots), threshold, candidate_limit }
    }

    /// Build with the threshold and candidate limit from `config`.
    pub fn from_config(depots: &[Depot], config: &SimConfig) -> Self {
        Self::new(depots, config.low_charge_threshold, config.candidate_limit)
    }
}

impl DispatchPolicy for GreedyPolicy {
    fn select_depot(&self, from: Point, depots: &[Depot]) -> DispatchResult<DepotId> {
        self.index
            .nearest_unvisited(from, depots)
            .ok_or(DispatchError::NoCandidate)
    }

    fn rank_vehicles(&self, from: Point, vehicles: &[Vehicle]) -> Vec<VehicleId> {
        nearest_vehicles(&from, vehicles, self.threshold, self.candidate_limit)
            .into_iter()
            .map(Vehicle::id)
            .collect()
    }
}

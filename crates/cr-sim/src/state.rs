//! Run state, per-step outcomes, and read-only snapshots.

use std::fmt;

use cr_core::{DepotId, Point, VehicleId};
use cr_fleet::{Agent, Depot, Vehicle};

// ── SimState ──────────────────────────────────────────────────────────────────

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HaltReason {
    /// The next move would have overrun the distance budget.
    BudgetExceeded,
    /// The charger needed packs but every depot was already visited.
    NoDepotAvailable,
    /// `run_to_completion` saw too many idle steps in a row.
    Stalled,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HaltReason::BudgetExceeded   => "distance budget exceeded",
            HaltReason::NoDepotAvailable => "no unvisited depot left",
            HaltReason::Stalled          => "no serviceable vehicle left",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimState {
    #[default]
    Running,
    /// Terminal.  Further steps are no-ops.
    Halted(HaltReason),
}

impl SimState {
    #[inline]
    pub fn is_halted(self) -> bool {
        matches!(self, SimState::Halted(_))
    }

    #[inline]
    pub fn halt_reason(self) -> Option<HaltReason> {
        match self {
            SimState::Running      => None,
            SimState::Halted(r)    => Some(r),
        }
    }
}

impl fmt::Display for SimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimState::Running   => f.write_str("running"),
            SimState::Halted(r) => write!(f, "halted: {r}"),
        }
    }
}

// ── Step outcome ──────────────────────────────────────────────────────────────

/// What the charger did in one committed step.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Drove to `depot` and took on `packs` charged packs.
    Refill { depot: DepotId, packs: u32, cost: f64 },
    /// Drove to `vehicle` and swapped its battery.
    Service { vehicle: VehicleId, cost: f64 },
    /// Packs on board but nothing eligible to service.
    Idle,
}

impl Action {
    /// Distance travelled by this action.
    pub fn cost(&self) -> f64 {
        match *self {
            Action::Refill { cost, .. } | Action::Service { cost, .. } => cost,
            Action::Idle => 0.0,
        }
    }
}

/// Result of one call to [`Sim::step`](crate::Sim::step).
///
/// The charger fields describe the state *after* the step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepOutcome {
    /// 1-based index of this step.  Unchanged by no-op steps on a halted run.
    pub step:      u64,
    pub state:     SimState,
    /// `None` when the step was rejected or the run was already halted.
    pub action:    Option<Action>,
    /// Vehicles relocated by drift at the start of the step.
    pub drifted:   Vec<VehicleId>,
    pub position:  Point,
    pub packs:     u32,
    pub travelled: f64,
}

/// The depot or vehicle a step acted upon.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Target<'a> {
    Depot(&'a Depot),
    Vehicle(&'a Vehicle),
}

impl StepOutcome {
    /// Resolve the acted-upon entity in `snapshot`, taken after this step.
    ///
    /// `None` for idle, rejected and no-op steps.
    pub fn target<'s>(&self, snapshot: &'s Snapshot) -> Option<Target<'s>> {
        match self.action? {
            Action::Refill { depot, .. } => snapshot.depots.get(depot.index()).map(Target::Depot),
            Action::Service { vehicle, .. } => {
                snapshot.vehicles.get(vehicle.index()).map(Target::Vehicle)
            }
            Action::Idle => None,
        }
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Owned copy of everything a presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub step:            u64,
    pub state:           SimState,
    pub distance_budget: f64,
    pub agent:           Agent,
    pub vehicles:        Vec<Vehicle>,
    pub depots:          Vec<Depot>,
}

impl Snapshot {
    #[inline]
    pub fn travelled(&self) -> f64 {
        self.agent.travelled()
    }

    pub fn remaining_budget(&self) -> f64 {
        (self.distance_budget - self.agent.travelled()).max(0.0)
    }

    /// Mean fleet charge, `None` for an empty fleet.
    pub fn average_charge(&self) -> Option<f64> {
        if self.vehicles.is_empty() {
            return None;
        }
        let total: f64 = self.vehicles.iter().map(Vehicle::charge).sum();
        Some(total / self.vehicles.len() as f64)
    }

    pub fn serviced_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_reserved()).count()
    }

    pub fn visited_depot_count(&self) -> usize {
        self.depots.iter().filter(|d| d.is_visited()).count()
    }

    /// Vehicles currently below `threshold` and not yet claimed.
    pub fn needing_service(&self, threshold: f64) -> usize {
        self.vehicles.iter().filter(|v| v.needs_service(threshold)).count()
    }
}

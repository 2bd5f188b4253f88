//! Plain data row types written by output backends.

use cr_core::Positioned;
use cr_fleet::Vehicle;
use cr_sim::{Action, Snapshot, StepOutcome};

/// One step of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRow {
    pub step:      u64,
    /// `refill`, `service`, `idle`, or `halt`.
    pub action:    &'static str,
    /// Depot id for a refill, vehicle id for a service.
    pub target:    Option<u32>,
    pub cost:      f64,
    /// Charger position after the step.
    pub x:         f64,
    pub y:         f64,
    pub packs:     u32,
    pub travelled: f64,
    /// Vehicles moved by drift this step.
    pub drifted:   u32,
}

impl StepRow {
    pub fn from_outcome(outcome: &StepOutcome) -> Self {
        let (action, target) = match outcome.action {
            Some(Action::Refill { depot, .. })    => ("refill", Some(depot.0)),
            Some(Action::Service { vehicle, .. }) => ("service", Some(vehicle.0)),
            Some(Action::Idle)                    => ("idle", None),
            None                                  => ("halt", None),
        };
        Self {
            step:      outcome.step,
            action,
            target,
            cost:      outcome.action.map_or(0.0, |a| a.cost()),
            x:         outcome.position.x,
            y:         outcome.position.y,
            packs:     outcome.packs,
            travelled: outcome.travelled,
            drifted:   outcome.drifted.len() as u32,
        }
    }
}

/// One vehicle as it stood at the end of the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleRow {
    pub vehicle_id: u32,
    pub x:          f64,
    pub y:          f64,
    pub charge:     f64,
    pub reserved:   bool,
}

impl VehicleRow {
    pub fn from_vehicle(v: &Vehicle) -> Self {
        let p = v.position();
        Self {
            vehicle_id: v.id().0,
            x:          p.x,
            y:          p.y,
            charge:     v.charge(),
            reserved:   v.is_reserved(),
        }
    }

    /// Every vehicle in `snapshot`, in id order.
    pub fn from_snapshot(snapshot: &Snapshot) -> Vec<Self> {
        snapshot.vehicles.iter().map(Self::from_vehicle).collect()
    }
}

//! The `Sim` struct and its step loop.

use cr_core::{Positioned, SimConfig, SimRng, VehicleId, distance};
use cr_dispatch::{DispatchError, DispatchPolicy, GreedyPolicy};
use cr_fleet::{Agent, DriftParams, Fleet, perturb};
use tracing::{debug, info};

use crate::{Action, HaltReason, NoopObserver, SimObserver, SimState, Snapshot, StepOutcome};

/// The simulation driver.
///
/// `Sim` owns the fleet, the charger, and the RNG for the whole run; nothing
/// else writes to them.  Each [`step`](Self::step) is atomic from the
/// charger's point of view: the budget is checked before any vehicle, depot,
/// or charger field changes, so a rejected move leaves no trace.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: DispatchPolicy = GreedyPolicy> {
    pub(crate) config:      SimConfig,
    pub(crate) drift:       DriftParams,
    pub(crate) fleet:       Fleet,
    pub(crate) agent:       Agent,
    pub(crate) rng:         SimRng,
    pub(crate) policy:      P,
    pub(crate) state:       SimState,
    pub(crate) steps:       u64,
    pub(crate) idle_streak: u32,
}

impl<P: DispatchPolicy> Sim<P> {
    // ── Read access ───────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Owned copy of the current state.  Two calls with no step in between
    /// return equal snapshots.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step:            self.steps,
            state:           self.state,
            distance_budget: self.config.distance_budget,
            agent:           self.agent.clone(),
            vehicles:        self.fleet.vehicles.clone(),
            depots:          self.fleet.depots.clone(),
        }
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Apply exactly one transition.
    ///
    /// On a halted run this is a no-op that reports the same halt.
    pub fn step(&mut self) -> StepOutcome {
        if self.state.is_halted() {
            return self.outcome(None, Vec::new());
        }

        self.steps += 1;
        let drifted = perturb(&mut self.fleet.vehicles, &self.drift, &mut self.rng);

        let result = if self.agent.packs() == 0 {
            self.refill()
        } else {
            self.service_nearest()
        };

        match result {
            Ok(action) => {
                if action == Action::Idle {
                    self.idle_streak += 1;
                } else {
                    self.idle_streak = 0;
                }
                debug!(
                    step = self.steps,
                    ?action,
                    travelled = self.agent.travelled(),
                    packs = self.agent.packs(),
                    "step committed"
                );
                self.outcome(Some(action), drifted)
            }
            Err(reason) => {
                self.halt(reason);
                self.outcome(None, drifted)
            }
        }
    }

    /// Step until the run halts and return the reason.
    pub fn run_to_completion(&mut self) -> HaltReason {
        self.run_to_completion_with(&mut NoopObserver)
    }

    /// Like [`run_to_completion`](Self::run_to_completion), reporting every
    /// step and the halt to `observer`.
    ///
    /// Besides the two natural halts, the run stops with
    /// [`HaltReason::Stalled`] after `config.idle_step_limit` consecutive idle
    /// steps.
    pub fn run_to_completion_with<O: SimObserver>(&mut self, observer: &mut O) -> HaltReason {
        loop {
            if let SimState::Halted(reason) = self.state {
                return reason;
            }
            let outcome = self.step();
            observer.on_step(&outcome);

            if !outcome.state.is_halted() && self.idle_streak >= self.config.idle_step_limit {
                self.halt(HaltReason::Stalled);
            }
            if let SimState::Halted(reason) = self.state {
                observer.on_halt(reason, &self.snapshot());
                return reason;
            }
        }
    }

    /// Run at most `n` steps, stopping early if the run halts.
    ///
    /// Idle steps never halt here; use this for incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimState {
        for _ in 0..n {
            if self.state.is_halted() {
                break;
            }
            let outcome = self.step();
            observer.on_step(&outcome);
            if let SimState::Halted(reason) = outcome.state {
                observer.on_halt(reason, &self.snapshot());
            }
        }
        self.state
    }

    // ── Transitions ───────────────────────────────────────────────────────

    fn refill(&mut self) -> Result<Action, HaltReason> {
        let from = self.agent.position();
        let id = self
            .policy
            .select_depot(from, &self.fleet.depots)
            .map_err(|DispatchError::NoCandidate| HaltReason::NoDepotAvailable)?;

        // An unknown or already visited id counts as no depot left.
        let target = self
            .fleet
            .depots
            .get(id.index())
            .filter(|d| !d.is_visited())
            .map(|d| d.position())
            .ok_or(HaltReason::NoDepotAvailable)?;
        let cost = distance(&from, &target);
        self.ensure_affordable(cost)?;

        let packs = self.fleet.depots[id.index()].draw(self.agent.free_slots());
        self.agent.move_to(target, cost);
        self.agent.load(packs);
        Ok(Action::Refill { depot: id, packs, cost })
    }

    fn service_nearest(&mut self) -> Result<Action, HaltReason> {
        let from = self.agent.position();
        let ranked = self.policy.rank_vehicles(from, &self.fleet.vehicles);
        // Ids the fleet does not know, or reserved vehicles, are skipped.
        let Some(id) = ranked
            .into_iter()
            .find(|id| self.fleet.vehicles.get(id.index()).is_some_and(|v| !v.is_reserved()))
        else {
            return Ok(Action::Idle);
        };

        let target = self.fleet.vehicles[id.index()].position();
        let cost = distance(&from, &target);
        self.ensure_affordable(cost)?;

        self.fleet.vehicles[id.index()].service();
        self.agent.move_to(target, cost);
        self.agent.deliver();
        Ok(Action::Service { vehicle: id, cost })
    }

    fn ensure_affordable(&self, cost: f64) -> Result<(), HaltReason> {
        if self.agent.travelled() + cost > self.config.distance_budget {
            Err(HaltReason::BudgetExceeded)
        } else {
            Ok(())
        }
    }

    fn halt(&mut self, reason: HaltReason) {
        self.state = SimState::Halted(reason);
        info!(
            %reason,
            steps = self.steps,
            travelled = self.agent.travelled(),
            serviced = self.fleet.vehicles.iter().filter(|v| v.is_reserved()).count(),
            "simulation halted"
        );
    }

    fn outcome(&self, action: Option<Action>, drifted: Vec<VehicleId>) -> StepOutcome {
        StepOutcome {
            step:      self.steps,
            state:     self.state,
            action,
            drifted,
            position:  self.agent.position(),
            packs:     self.agent.packs(),
            travelled: self.agent.travelled(),
        }
    }
}

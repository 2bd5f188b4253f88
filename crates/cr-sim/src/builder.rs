//! Fluent builder for constructing a [`Sim`].

use cr_core::{Point, Positioned, SimConfig, SimRng};
use cr_dispatch::{DispatchPolicy, GreedyPolicy};
use cr_fleet::{Agent, DriftParams, Fleet, FleetError};

use crate::{Sim, SimError, SimResult, SimState};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: budget, thresholds, drift parameters, seed, …
/// - [`Fleet`]: from [`cr_fleet::FleetBuilder`] or a scatter loader
/// - the charger's start position
///
/// # Optional inputs
///
/// | Method        | Default                          |
/// |---------------|----------------------------------|
/// | `.seed(s)`    | `config.seed`                    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, fleet, Point::new(500.0, 500.0)).build()?;
/// sim.run_to_completion();
/// ```
pub struct SimBuilder {
    config: SimConfig,
    fleet:  Fleet,
    start:  Point,
    seed:   Option<u64>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, fleet: Fleet, start: Point) -> Self {
        Self { config, fleet, start, seed: None }
    }

    /// Override the RNG seed from the config.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`] using the
    /// nearest-neighbour [`GreedyPolicy`].
    pub fn build(self) -> SimResult<Sim<GreedyPolicy>> {
        self.validate()?;
        let policy = GreedyPolicy::from_config(&self.fleet.depots, &self.config);
        Ok(self.assemble(policy))
    }

    /// Like [`build`](Self::build) with a caller-supplied dispatch policy.
    pub fn build_with<P: DispatchPolicy>(self, policy: P) -> SimResult<Sim<P>> {
        self.validate()?;
        Ok(self.assemble(policy))
    }

    fn validate(&self) -> SimResult<()> {
        self.config.validate()?;

        if !self.start.is_finite() {
            return Err(SimError::InvalidStart { x: self.start.x, y: self.start.y });
        }

        let bounds = &self.config.bounds;
        for (i, v) in self.fleet.vehicles.iter().enumerate() {
            if v.id().index() != i {
                return Err(SimError::EntityOrder { what: "vehicle", index: i });
            }
            let p = v.position();
            if !bounds.contains(p) {
                return Err(FleetError::OutOfBounds { what: "vehicle", index: i, x: p.x, y: p.y }.into());
            }
        }
        for (i, d) in self.fleet.depots.iter().enumerate() {
            if d.id().index() != i {
                return Err(SimError::EntityOrder { what: "depot", index: i });
            }
            let p = d.position();
            if !bounds.contains(p) {
                return Err(FleetError::OutOfBounds { what: "depot", index: i, x: p.x, y: p.y }.into());
            }
        }
        Ok(())
    }

    fn assemble<P: DispatchPolicy>(self, policy: P) -> Sim<P> {
        let seed = self.seed.unwrap_or(self.config.seed);
        Sim {
            drift:       DriftParams::from_config(&self.config),
            agent:       Agent::new(self.start, self.config.pack_capacity),
            rng:         SimRng::new(seed),
            config:      self.config,
            fleet:       self.fleet,
            policy,
            state:       SimState::Running,
            steps:       0,
            idle_streak: 0,
        }
    }
}

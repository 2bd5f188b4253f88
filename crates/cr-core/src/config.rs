//! Simulation configuration.

use crate::{Bounds, CoreError, CoreResult};

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML file by the application crate and passed to
/// the simulation builder.  Every field has a default, so a partial file is
/// enough.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Area the fleet lives in.  Drifting vehicles are relocated inside it.
    pub bounds: Bounds,

    /// Maximum total distance the charger may travel in one run.
    pub distance_budget: f64,

    /// Vehicles strictly below this charge are eligible for servicing.
    pub low_charge_threshold: f64,

    /// How many ranked candidates the dispatch policy returns.
    pub candidate_limit: usize,

    /// Vehicles relocated by the environment each step.
    pub perturb_sample_size: usize,

    /// Packs the charger can carry.
    pub pack_capacity: u32,

    /// Charge lost per unit of distance a drifting vehicle moves.
    pub charge_decay_rate: f64,

    /// Consecutive idle steps after which `run_to_completion` gives up.
    pub idle_step_limit: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bounds:               Bounds::default(),
            distance_budget:      20_000.0,
            low_charge_threshold: 50.0,
            candidate_limit:      10,
            perturb_sample_size:  10,
            pack_capacity:        10,
            charge_decay_rate:    0.1,
            idle_step_limit:      1,
            seed:                 42,
        }
    }
}

impl SimConfig {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.bounds.is_valid() {
            return Err(CoreError::Config(format!("invalid area bounds {}", self.bounds)));
        }
        if !self.distance_budget.is_finite() || self.distance_budget < 0.0 {
            return Err(CoreError::Config(format!(
                "distance budget must be finite and non-negative, got {}",
                self.distance_budget
            )));
        }
        if !(self.low_charge_threshold > 0.0 && self.low_charge_threshold <= 100.0) {
            return Err(CoreError::Config(format!(
                "low-charge threshold must be in (0, 100], got {}",
                self.low_charge_threshold
            )));
        }
        if self.candidate_limit == 0 {
            return Err(CoreError::Config("candidate limit must be at least 1".into()));
        }
        if self.pack_capacity == 0 {
            return Err(CoreError::Config("pack capacity must be at least 1".into()));
        }
        if !self.charge_decay_rate.is_finite() || self.charge_decay_rate < 0.0 {
            return Err(CoreError::Config(format!(
                "charge decay rate must be finite and non-negative, got {}",
                self.charge_decay_rate
            )));
        }
        if self.idle_step_limit == 0 {
            return Err(CoreError::Config("idle step limit must be at least 1".into()));
        }
        Ok(())
    }
}

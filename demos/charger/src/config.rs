//! `charger.toml` loading.
//!
//! ```toml
//! [sim]
//! distance_budget      = 20000.0
//! low_charge_threshold = 50.0
//! seed                 = 7
//!
//! [sim.bounds]
//! min = { x = 0.0, y = 0.0 }
//! max = { x = 1000.0, y = 1000.0 }
//!
//! [data]
//! vehicles       = 150
//! depots         = 20
//! depot_capacity = 10
//! ```
//!
//! Every key is optional.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cr_core::SimConfig;

/// Layout of the scatter file the run reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub vehicles:       usize,
    pub depots:         usize,
    pub depot_capacity: u32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { vehicles: 150, depots: 20, depot_capacity: 10 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargerConfig {
    pub sim:  SimConfig,
    pub data: DataConfig,
}

impl ChargerConfig {
    /// Read `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

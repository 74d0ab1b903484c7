//! Simulation run configuration and validation.
//!
//! ```
//! use mailbot_logic::config::{validate_config, SimConfig};
//!
//! let config: SimConfig = serde_json::from_str(r#"{ "trials": 20, "seed": 9 }"#).unwrap();
//! assert_eq!(config.parcel_count, 5);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Result, SimError};
use crate::graph::{Location, RoadGraph};
use crate::village;

/// Default number of random tasks per comparison.
pub const DEFAULT_TRIALS: usize = 100;

/// Default turn cap per run.
pub const DEFAULT_TURN_CAP: usize = 10_000;

/// Parameters for generating tasks and running strategies over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Parcels per random task.
    pub parcel_count: usize,
    /// Name of the location every task starts at.
    pub start: String,
    /// Random tasks per comparison.
    pub trials: usize,
    /// Give up on a run after this many turns. `None` runs until done.
    pub turn_cap: Option<usize>,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            parcel_count: village::DEFAULT_PARCEL_COUNT,
            start: village::DEFAULT_START.to_string(),
            trials: DEFAULT_TRIALS,
            turn_cap: Some(DEFAULT_TURN_CAP),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Resolve the start location against `graph`.
    pub fn start_location(&self, graph: &RoadGraph) -> Result<Location> {
        graph
            .location(&self.start)
            .cloned()
            .ok_or_else(|| SimError::UnknownLocation(Location::from(self.start.as_str())))
    }

    /// Validate, turning any problems into [`SimError::InvalidConfig`].
    pub fn validated(self) -> Result<Self> {
        let errors = validate_config(&self);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SimError::InvalidConfig(errors))
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("trials must be at least 1")]
    NoTrials,
    #[error("turn cap must be at least 1")]
    ZeroTurnCap,
    #[error("start location name is empty")]
    EmptyStart,
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SimConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.trials == 0 {
        errors.push(ConfigError::NoTrials);
    }
    if config.turn_cap == Some(0) {
        errors.push(ConfigError::ZeroTurnCap);
    }
    if config.start.trim().is_empty() {
        errors.push(ConfigError::EmptyStart);
    }

    errors
}

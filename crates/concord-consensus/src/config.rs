//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rule::{is_valid_step_size, DEFAULT_EPSILON, DEFAULT_MAX_ROUNDS, DEFAULT_STEP_SIZE};

/// Parameters for a consensus run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Blending factor α in (0, 1]
    pub step_size: f64,
    /// Maximum number of rounds before giving up
    pub max_rounds: usize,
    /// Convergence tolerance
    pub epsilon: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
            max_rounds: DEFAULT_MAX_ROUNDS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter's range.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_step_size(self.step_size) {
            return Err(Error::InvalidConfiguration {
                parameter: "step_size",
                value: self.step_size,
            });
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(Error::InvalidConfiguration {
                parameter: "epsilon",
                value: self.epsilon,
            });
        }
        Ok(())
    }
}

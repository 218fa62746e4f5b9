//! Upload simulation timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Timing knobs for the simulated upload progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Interval between progress ticks, in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Upper bound of the random progress increment per tick, in percent.
    #[serde(default = "default_max_increment")]
    pub max_increment: f64,
    /// How long a finished upload stays in the active list, in milliseconds.
    #[serde(default = "default_completion_linger")]
    pub completion_linger_ms: u64,
}

impl SimulatorConfig {
    /// Tick interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Completion linger as a [`Duration`].
    pub fn completion_linger(&self) -> Duration {
        Duration::from_millis(self.completion_linger_ms)
    }

    /// Validate the timing values.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.tick_interval_ms == 0 {
            return Err(AppError::configuration(
                "simulator.tick_interval_ms must be greater than zero",
            ));
        }
        if !(self.max_increment.is_normal() && self.max_increment > 0.0) {
            return Err(AppError::configuration(format!(
                "simulator.max_increment must be a positive normal number, got {}",
                self.max_increment
            )));
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            max_increment: default_max_increment(),
            completion_linger_ms: default_completion_linger(),
        }
    }
}

fn default_tick_interval() -> u64 {
    200
}

fn default_max_increment() -> f64 {
    15.0
}

fn default_completion_linger() -> u64 {
    500
}

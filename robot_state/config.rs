//! Estimator configuration
//!
//! Both values are fixed for the lifetime of an estimator.
//!
//! ```toml
//! history_window_secs = 2.0
//! odometry_std_devs = [0.003, 0.003, 0.002]
//! ```

use crate::error::{RobotStateError, RobotStateResult};
use crate::history::DEFAULT_RETENTION_SECS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default odometry process noise (x m, y m, theta rad)
pub const DEFAULT_ODOMETRY_STD_DEVS: [f64; 3] = [0.003, 0.003, 0.002];

/// Configuration for the pose estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    /// How far back a vision fix may reach, in seconds
    ///
    /// Also bounds the pose history kept for the lookup.
    ///
    /// Default: 2.0
    pub history_window_secs: f64,

    /// Odometry process noise standard deviations (x, y, theta)
    ///
    /// Larger values trust vision more. An axis set to zero is never
    /// corrected by vision.
    ///
    /// Default: [0.003, 0.003, 0.002]
    pub odometry_std_devs: [f64; 3],
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            history_window_secs: DEFAULT_RETENTION_SECS,
            odometry_std_devs: DEFAULT_ODOMETRY_STD_DEVS,
        }
    }
}

impl EstimatorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> RobotStateResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> RobotStateResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Set the history window
    pub fn with_history_window(mut self, seconds: f64) -> Self {
        self.history_window_secs = seconds;
        self
    }

    /// Set the odometry process noise
    pub fn with_odometry_std_devs(mut self, std_devs: [f64; 3]) -> Self {
        self.odometry_std_devs = std_devs;
        self
    }

    /// Check the configuration for unusable values
    pub fn validate(&self) -> RobotStateResult<()> {
        if !(self.history_window_secs.is_finite() && self.history_window_secs > 0.0) {
            return Err(RobotStateError::InvalidConfig(format!(
                "history_window_secs must be positive and finite, got {}",
                self.history_window_secs
            )));
        }

        for (axis, std_dev) in ["x", "y", "theta"].iter().zip(self.odometry_std_devs) {
            if !(std_dev.is_finite() && std_dev >= 0.0) {
                return Err(RobotStateError::InvalidConfig(format!(
                    "odometry std dev for {axis} must be finite and non-negative, got {std_dev}"
                )));
            }
        }

        Ok(())
    }

    /// Per-axis process variance (squared standard deviations)
    pub fn process_variance(&self) -> [f64; 3] {
        self.odometry_std_devs.map(|std_dev| std_dev * std_dev)
    }
}

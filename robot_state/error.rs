//! Error types for estimator construction
//!
//! Ingestion never fails: stale or unusable observations are dropped and the
//! running estimate is preserved. Errors only surface while building an
//! estimator or loading its configuration.

use thiserror::Error;

/// Robot state errors
#[derive(Debug, Error)]
pub enum RobotStateError {
    #[error("Invalid estimator configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid kinematics: {0}")]
    InvalidKinematics(String),

    #[error("Failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for robot state operations
pub type RobotStateResult<T> = Result<T, RobotStateError>;

//! # Robot State
//!
//! Latency-compensated 2D pose estimation for wheeled robots.
//!
//! Wheel odometry arrives every control cycle and is integrated immediately.
//! Vision fixes arrive late and sparsely; each one is matched against the
//! recorded odometry at the time its frame was captured and blended in with
//! a steady-state Kalman gain.
//!
//! ## Structure
//!
//! ```text
//! robot_state/
//! ── geometry/       # Pose2D, Twist2D, Rotation2D, Pose3D, ChassisSpeeds
//! ── history/        # Duration-bounded, interpolating pose buffer
//! ── kinematics/     # Wheel readings to chassis twist (swerve, differential)
//! ── estimator/      # RobotState: odometry integration and vision fusion
//! ── config.rs       # EstimatorConfig (TOML)
//! ── error.rs        # RobotStateError
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use robot_state::prelude::*;
//!
//! let kinematics = DifferentialKinematics::new(0.5)?;
//! let config = EstimatorConfig::default().with_history_window(1.0);
//! let mut state = RobotState::new(kinematics, config)?;
//!
//! for tick in 1..=50 {
//!     let t = tick as f64 * 0.02;
//!     let wheels = [WheelPosition::straight(t); 4];
//!     state.add_odometry_observation(&OdometryObservation::new(t, wheels, None));
//! }
//!
//! assert!((state.pose().x - 1.0).abs() < 1e-9);
//! # Ok::<(), robot_state::RobotStateError>(())
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod geometry;
pub mod history;
pub mod kinematics;

pub use config::EstimatorConfig;
pub use error::{RobotStateError, RobotStateResult};
pub use estimator::{
    vision_gain, OdometryObservation, RobotState, VisionObservation, VisionOutcome,
};
pub use geometry::{ChassisSpeeds, Pose2D, Pose3D, Rotation2D, Twist2D};
pub use history::PoseHistory;
pub use kinematics::{
    DifferentialKinematics, SwerveKinematics, WheelKinematics, WheelPosition, WHEEL_COUNT,
};

/// Prelude module for convenient imports
///
/// # Usage
/// ```rust
/// use robot_state::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::EstimatorConfig;
    pub use crate::error::{RobotStateError, RobotStateResult};

    pub use crate::estimator::{
        OdometryObservation, RobotState, VisionObservation, VisionOutcome,
    };

    pub use crate::geometry::{ChassisSpeeds, Pose2D, Pose3D, Rotation2D, Twist2D};

    pub use crate::kinematics::{
        DifferentialKinematics, SwerveKinematics, WheelKinematics, WheelPosition,
    };
}

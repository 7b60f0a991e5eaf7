//! Latency-compensated pose estimator
//!
//! Fuses high-rate wheel odometry with sparse, delayed vision fixes.
//!
//! # Overview
//!
//! The estimator keeps two poses:
//! - **odometry pose**: dead reckoning from wheels and gyro only; drifts
//! - **estimated pose**: the odometry pose plus every vision correction so far
//!
//! Odometry ticks move both poses by the same motion. A vision fix is
//! matched against the odometry pose recorded at the fix's timestamp, so a
//! frame that took 100 ms to process still corrects the estimate as of the
//! moment it was captured.
//!
//! # Example
//!
//! ```rust
//! use robot_state::prelude::*;
//!
//! let kinematics = SwerveKinematics::rectangular(0.6, 0.6)?;
//! let mut state = RobotState::new(kinematics, EstimatorConfig::default())?;
//!
//! // Drive subsystem, every control cycle
//! let wheels = [WheelPosition::straight(1.0); 4];
//! state.add_odometry_observation(&OdometryObservation::new(1.0, wheels, None));
//!
//! // Vision subsystem, whenever a frame has been processed
//! let fix = Pose3D::from_pose_2d(&Pose2D::new(1.5, 0.0, 0.0));
//! let outcome = state.add_vision_observation(&VisionObservation::new(1.0, fix, [0.1; 3]));
//! assert!(outcome.is_applied());
//!
//! let pose = state.pose();
//! assert!(pose.x > 1.0 && pose.x < 1.5);
//! # Ok::<(), robot_state::RobotStateError>(())
//! ```
//!
//! # Threading
//!
//! All calls run to completion on the calling thread. The estimator has no
//! internal locking; share it behind a mutex if odometry and vision arrive
//! on different threads.

mod observation;
mod odometry;
mod vision;

pub use observation::{OdometryObservation, VisionObservation, VisionOutcome};
pub use vision::vision_gain;

use crate::config::EstimatorConfig;
use crate::error::RobotStateResult;
use crate::geometry::{ChassisSpeeds, Pose2D, Rotation2D};
use crate::history::PoseHistory;
use crate::kinematics::{WheelKinematics, WheelPosition, WHEEL_COUNT};

/// Robot pose estimator
pub struct RobotState<K: WheelKinematics> {
    kinematics: K,
    config: EstimatorConfig,

    odometry_pose: Pose2D,
    estimated_pose: Pose2D,
    pose_history: PoseHistory,

    last_wheel_positions: [WheelPosition; WHEEL_COUNT],
    gyro_offset: Rotation2D,
    process_variance: [f64; 3],

    robot_velocity: ChassisSpeeds,
}

impl<K: WheelKinematics> RobotState<K> {
    /// Create an estimator at the origin
    ///
    /// Wheel readings are assumed to start at zero distance; the first
    /// odometry observation integrates from there.
    pub fn new(kinematics: K, config: EstimatorConfig) -> RobotStateResult<Self> {
        config.validate()?;

        Ok(Self {
            kinematics,
            process_variance: config.process_variance(),
            pose_history: PoseHistory::new(config.history_window_secs),
            config,
            odometry_pose: Pose2D::origin(),
            estimated_pose: Pose2D::origin(),
            last_wheel_positions: [WheelPosition::default(); WHEEL_COUNT],
            gyro_offset: Rotation2D::ZERO,
            robot_velocity: ChassisSpeeds::default(),
        })
    }

    /// Reset the pose estimate and odometry pose to the given pose
    ///
    /// The gyro offset is recomputed so the current gyro reading maps to
    /// the new heading. History is cleared because samples from before a
    /// discontinuity cannot anchor later corrections.
    pub fn reset_pose(&mut self, pose: Pose2D) {
        let current_gyro_frame = self.odometry_pose.rotation() - self.gyro_offset;
        self.gyro_offset = pose.rotation() - current_gyro_frame;

        self.estimated_pose = pose;
        self.odometry_pose = pose;
        self.pose_history.clear();

        log::debug!(
            "Pose reset to ({:.3}, {:.3}, {:.3}), gyro offset {:.4} rad",
            pose.x,
            pose.y,
            pose.theta,
            self.gyro_offset.radians()
        );
    }

    /// Best current estimate (odometry plus vision corrections)
    pub fn pose(&self) -> Pose2D {
        self.estimated_pose
    }

    /// Odometry-only pose
    pub fn odometry_pose(&self) -> Pose2D {
        self.odometry_pose
    }

    /// Heading of the estimated pose
    pub fn rotation(&self) -> Rotation2D {
        self.estimated_pose.rotation()
    }

    /// Last robot-relative velocity reported by the drive subsystem
    pub fn robot_velocity(&self) -> ChassisSpeeds {
        self.robot_velocity
    }

    /// Record the robot-relative velocity measured by the drive subsystem
    pub fn set_robot_velocity(&mut self, velocity: ChassisSpeeds) {
        self.robot_velocity = velocity;
    }

    /// Robot velocity expressed in the field frame
    pub fn field_velocity(&self) -> ChassisSpeeds {
        ChassisSpeeds::from_robot_relative(&self.robot_velocity, self.rotation())
    }

    /// Recorded odometry poses
    pub fn history(&self) -> &PoseHistory {
        &self.pose_history
    }

    /// Configuration the estimator was built with
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Wheel kinematics in use
    pub fn kinematics(&self) -> &K {
        &self.kinematics
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::kinematics::SwerveKinematics;

    pub fn swerve_state() -> RobotState<SwerveKinematics> {
        let kinematics = SwerveKinematics::rectangular(0.6, 0.6).unwrap();
        RobotState::new(kinematics, EstimatorConfig::default()).unwrap()
    }

    /// All modules pointing forward with the same cumulative distance
    pub fn straight(
        timestamp: f64,
        distance: f64,
        gyro_angle: Option<Rotation2D>,
    ) -> OdometryObservation {
        OdometryObservation::new(
            timestamp,
            [WheelPosition::straight(distance); WHEEL_COUNT],
            gyro_angle,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::kinematics::SwerveKinematics;
    use approx::assert_relative_eq;

    #[test]
    fn test_starts_at_origin() {
        let state = swerve_state();
        assert_eq!(state.pose(), Pose2D::origin());
        assert_eq!(state.odometry_pose(), Pose2D::origin());
        assert!(state.history().is_empty());
        assert_eq!(state.config(), &EstimatorConfig::default());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let kinematics = SwerveKinematics::rectangular(0.6, 0.6).unwrap();
        let config = EstimatorConfig::default().with_history_window(-1.0);
        assert!(RobotState::new(kinematics, config).is_err());
    }

    #[test]
    fn test_reset_pose() {
        let mut state = swerve_state();
        state.add_odometry_observation(&straight(0.1, 1.0, None));
        assert!(!state.history().is_empty());

        let target = Pose2D::new(5.0, 2.0, 1.0);
        state.reset_pose(target);

        assert_eq!(state.pose(), target);
        assert_eq!(state.odometry_pose(), target);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_reset_aligns_gyro() {
        let mut state = swerve_state();
        let gyro = Rotation2D::from_degrees(40.0);
        state.add_odometry_observation(&straight(0.1, 0.0, Some(gyro)));

        state.reset_pose(Pose2D::new(0.0, 0.0, std::f64::consts::PI));

        // Same gyro reading now means facing pi
        state.add_odometry_observation(&straight(0.2, 0.0, Some(gyro)));
        assert_relative_eq!(
            state.odometry_pose().theta.abs(),
            std::f64::consts::PI,
            epsilon = 1e-9
        );

        // Gyro turning 10 degrees left turns the robot 10 degrees left
        let turned = Rotation2D::from_degrees(50.0);
        state.add_odometry_observation(&straight(0.3, 0.0, Some(turned)));
        assert_relative_eq!(state.rotation().degrees(), -170.0, epsilon = 1e-9);
    }

    #[test]
    fn test_field_velocity() {
        let mut state = swerve_state();
        state.reset_pose(Pose2D::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
        state.set_robot_velocity(ChassisSpeeds::new(2.0, 0.0, 0.25));

        assert_eq!(state.robot_velocity(), ChassisSpeeds::new(2.0, 0.0, 0.25));
        let field = state.field_velocity();
        assert_relative_eq!(field.vx, 0.0, epsilon = 1e-12);
        assert_relative_eq!(field.vy, 2.0, epsilon = 1e-12);
        assert_relative_eq!(field.omega, 0.25);
    }
}

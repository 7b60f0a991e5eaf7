//! Odometry integration
//!
//! Every tick advances the odometry-only pose by the kinematic twist,
//! optionally snaps its heading to the gyro, records it in the history and
//! advances the fused estimate by the same net motion.

use super::observation::OdometryObservation;
use super::RobotState;
use crate::kinematics::WheelKinematics;

impl<K: WheelKinematics> RobotState<K> {
    /// Adds a new odometry sample from the drive subsystem
    ///
    /// Observations with non-finite values are dropped; the next valid one
    /// integrates from the last accepted wheel readings.
    pub fn add_odometry_observation(&mut self, observation: &OdometryObservation) {
        if !observation.is_valid() {
            log::warn!(
                "Dropping odometry observation with non-finite values at t={}",
                observation.timestamp
            );
            return;
        }

        let twist = self
            .kinematics
            .to_twist(&self.last_wheel_positions, &observation.wheel_positions);
        self.last_wheel_positions = observation.wheel_positions;

        let previous_odometry_pose = self.odometry_pose;
        self.odometry_pose = self.odometry_pose.apply(&twist);

        // Gyro heading replaces integrated wheel rotation
        if let Some(gyro_angle) = observation.gyro_angle {
            self.odometry_pose = self
                .odometry_pose
                .with_rotation(gyro_angle + self.gyro_offset);
        }

        self.pose_history
            .insert(observation.timestamp, self.odometry_pose);

        let odometry_delta = previous_odometry_pose.delta(&self.odometry_pose);
        self.estimated_pose = if self.estimated_pose == previous_odometry_pose {
            // Not diverged from odometry yet: track it exactly
            self.odometry_pose
        } else {
            self.estimated_pose.apply(&odometry_delta)
        };

        log::trace!(
            "odometry t={:.3} twist=({:.4}, {:.4}, {:.4}) pose=({:.3}, {:.3}, {:.3})",
            observation.timestamp,
            odometry_delta.dx,
            odometry_delta.dy,
            odometry_delta.dtheta,
            self.estimated_pose.x,
            self.estimated_pose.y,
            self.estimated_pose.theta
        );
    }
}

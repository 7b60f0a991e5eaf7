//! Vision fusion
//!
//! A vision fix describes where the robot was when the camera frame was
//! captured, which is already in the past by the time it arrives. The fused
//! estimate is walked back to that time through the recorded odometry,
//! nudged toward the fix, then walked forward again through the same motion.
//!
//! The nudge uses the closed-form steady-state gain of a Kalman filter with
//! a random-walk process model and direct observation, evaluated per axis:
//!
//! ```text
//! gain = q / (q + sqrt(q * r))
//! ```
//!
//! where `q` is the odometry process variance and `r` the measurement
//! variance. No covariance is propagated between updates.

use super::observation::{VisionObservation, VisionOutcome};
use super::RobotState;
use crate::kinematics::WheelKinematics;

/// Steady-state Kalman gain for one axis
///
/// Returns 0 when `process_variance` is zero: an axis that never drifts is
/// never corrected. Otherwise the gain lies in (0, 1] and falls as the
/// measurement variance grows.
pub fn vision_gain(process_variance: f64, measurement_variance: f64) -> f64 {
    if process_variance == 0.0 {
        return 0.0;
    }
    process_variance / (process_variance + (process_variance * measurement_variance).sqrt())
}

impl<K: WheelKinematics> RobotState<K> {
    /// Adds a new vision pose observation from the vision subsystem
    ///
    /// Stale or unusable observations are dropped without touching the
    /// estimate; the returned outcome says which case applied.
    pub fn add_vision_observation(&mut self, observation: &VisionObservation) -> VisionOutcome {
        if !observation.is_valid() {
            log::warn!(
                "Dropping vision observation with non-finite values at t={}",
                observation.timestamp
            );
            return VisionOutcome::Invalid;
        }

        if self.is_observation_too_old(observation.timestamp) {
            log::debug!(
                "Dropping stale vision observation at t={:.3} (newest odometry {:?})",
                observation.timestamp,
                self.pose_history.newest_timestamp()
            );
            return VisionOutcome::Stale;
        }

        let Some(sample) = self.pose_history.sample_at(observation.timestamp) else {
            log::debug!(
                "No odometry sample for vision observation at t={:.3}",
                observation.timestamp
            );
            return VisionOutcome::NoSample;
        };

        let backward = self.odometry_pose.delta(&sample);
        let forward = sample.delta(&self.odometry_pose);
        let estimate_at_time = self.estimated_pose.apply(&backward);

        let residual = estimate_at_time.delta(&observation.vision_pose.to_pose_2d());
        let gains = self.vision_gains(&observation.std_devs);
        let correction = residual.scale_axes(gains);

        self.estimated_pose = estimate_at_time.apply(&correction).apply(&forward);

        log::trace!(
            "vision t={:.3} residual=({:.4}, {:.4}, {:.4}) gains=({:.4}, {:.4}, {:.4})",
            observation.timestamp,
            residual.dx,
            residual.dy,
            residual.dtheta,
            gains[0],
            gains[1],
            gains[2]
        );
        VisionOutcome::Applied
    }

    /// Per-axis gains for a measurement with the given standard deviations
    pub fn vision_gains(&self, std_devs: &[f64; 3]) -> [f64; 3] {
        std::array::from_fn(|i| vision_gain(self.process_variance[i], std_devs[i] * std_devs[i]))
    }

    fn is_observation_too_old(&self, timestamp: f64) -> bool {
        match self.pose_history.newest_timestamp() {
            Some(newest) => newest - self.pose_history.retention_window() > timestamp,
            None => true,
        }
    }
}

//! Skid-steer kinematics
//!
//! Wheels are ordered front-left, front-right, back-left, back-right. Each
//! side is averaged, then the usual differential drive forward kinematics
//! apply:
//!
//! ```text
//! linear  = (left + right) / 2
//! angular = (right - left) / track_width
//! ```

use super::{WheelKinematics, WheelPosition, WHEEL_COUNT};
use crate::error::{RobotStateError, RobotStateResult};
use crate::geometry::Twist2D;

/// Differential (tank) drive kinematics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialKinematics {
    track_width: f64, // Distance between left and right wheels (m)
}

impl DifferentialKinematics {
    /// Create new differential drive kinematics
    ///
    /// # Arguments
    /// * `track_width` - Distance between left and right wheels (meters)
    pub fn new(track_width: f64) -> RobotStateResult<Self> {
        if !(track_width.is_finite() && track_width > 0.0) {
            return Err(RobotStateError::InvalidKinematics(format!(
                "track width must be positive, got {track_width}"
            )));
        }
        Ok(Self { track_width })
    }

    /// Get track width
    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    /// Forward kinematics: side displacements to (linear, angular) displacement
    pub fn forward_kinematics(&self, left: f64, right: f64) -> (f64, f64) {
        let linear = (left + right) / 2.0;
        let angular = (right - left) / self.track_width;
        (linear, angular)
    }
}

impl WheelKinematics for DifferentialKinematics {
    fn to_twist(
        &self,
        start: &[WheelPosition; WHEEL_COUNT],
        end: &[WheelPosition; WHEEL_COUNT],
    ) -> Twist2D {
        let delta = |i: usize| end[i].distance - start[i].distance;
        let left = (delta(0) + delta(2)) / 2.0;
        let right = (delta(1) + delta(3)) / 2.0;

        let (linear, angular) = self.forward_kinematics(left, right);
        Twist2D::new(linear, 0.0, angular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wheels(left: f64, right: f64) -> [WheelPosition; WHEEL_COUNT] {
        [
            WheelPosition::straight(left),
            WheelPosition::straight(right),
            WheelPosition::straight(left),
            WheelPosition::straight(right),
        ]
    }

    #[test]
    fn test_rejects_bad_track_width() {
        assert!(DifferentialKinematics::new(0.0).is_err());
        assert!(DifferentialKinematics::new(-0.5).is_err());
        assert!(DifferentialKinematics::new(f64::NAN).is_err());
    }

    #[test]
    fn test_forward_motion() {
        let dd = DifferentialKinematics::new(0.5).unwrap();

        // Both sides same distance = straight line
        let twist = dd.to_twist(&wheels(0.0, 0.0), &wheels(1.0, 1.0));
        assert_eq!(twist, Twist2D::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotation_in_place() {
        let dd = DifferentialKinematics::new(0.5).unwrap();

        // Opposite distances = rotation
        let twist = dd.to_twist(&wheels(2.0, 2.0), &wheels(1.75, 2.25));
        assert_relative_eq!(twist.dx, 0.0);
        assert_relative_eq!(twist.dtheta, 1.0);
    }
}

use super::pose::Pose2D;
use serde::{Deserialize, Serialize};

/// 3D pose as reported by a camera-based estimator
///
/// Rotation is a unit quaternion [x, y, z, w].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose3D {
    /// Translation [x, y, z] in meters
    pub translation: [f64; 3],
    /// Rotation as quaternion [x, y, z, w]
    pub rotation: [f64; 4],
}

impl Default for Pose3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose3D {
    /// Create a new 3D pose
    pub fn new(translation: [f64; 3], rotation: [f64; 4]) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Identity pose (no translation or rotation)
    pub fn identity() -> Self {
        Self::new([0.0; 3], [0.0, 0.0, 0.0, 1.0])
    }

    /// Lift a planar pose (z = 0, yaw only)
    pub fn from_pose_2d(pose: &Pose2D) -> Self {
        let half_theta = pose.theta / 2.0;
        Self::new(
            [pose.x, pose.y, 0.0],
            [0.0, 0.0, half_theta.sin(), half_theta.cos()],
        )
    }

    /// Rotation about the vertical axis in radians
    pub fn yaw(&self) -> f64 {
        let [x, y, z, w] = self.rotation;
        (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z))
    }

    /// Project onto the floor plane, dropping height, roll and pitch
    pub fn to_pose_2d(&self) -> Pose2D {
        Pose2D::new(self.translation[0], self.translation[1], self.yaw())
    }

    /// Check if values are finite
    pub fn is_valid(&self) -> bool {
        self.translation.iter().all(|v| v.is_finite())
            && self.rotation.iter().all(|v| v.is_finite())
    }
}

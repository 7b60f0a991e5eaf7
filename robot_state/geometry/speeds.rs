use super::rotation::Rotation2D;
use serde::{Deserialize, Serialize};

/// Planar chassis velocity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChassisSpeeds {
    /// Velocity along x in m/s
    pub vx: f64,
    /// Velocity along y in m/s
    pub vy: f64,
    /// Angular velocity in rad/s
    pub omega: f64,
}

impl ChassisSpeeds {
    pub fn new(vx: f64, vy: f64, omega: f64) -> Self {
        Self { vx, vy, omega }
    }

    /// Express robot-relative speeds in the field frame given the robot heading
    pub fn from_robot_relative(speeds: &ChassisSpeeds, heading: Rotation2D) -> Self {
        let (vx, vy) = heading.rotate(speeds.vx, speeds.vy);
        Self::new(vx, vy, speeds.omega)
    }

    /// Express field-relative speeds in the robot frame given the robot heading
    pub fn to_robot_relative(speeds: &ChassisSpeeds, heading: Rotation2D) -> Self {
        let (vx, vy) = (-heading).rotate(speeds.vx, speeds.vy);
        Self::new(vx, vy, speeds.omega)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_field_relative_conversion() {
        let robot = ChassisSpeeds::new(1.0, 0.0, 0.5);
        let field = ChassisSpeeds::from_robot_relative(&robot, Rotation2D::from_degrees(90.0));
        assert_relative_eq!(field.vx, 0.0, epsilon = 1e-12);
        assert_relative_eq!(field.vy, 1.0, epsilon = 1e-12);
        assert_relative_eq!(field.omega, 0.5);

        let back = ChassisSpeeds::to_robot_relative(&field, Rotation2D::from_degrees(90.0));
        assert_relative_eq!(back.vx, 1.0, epsilon = 1e-12);
        assert_relative_eq!(back.vy, 0.0, epsilon = 1e-12);
    }
}

//! Swerve drive kinematics
//!
//! Each module contributes a displacement vector `distance * (cos a, sin a)`.
//! For a rigid chassis moving by (dx, dy, dtheta) a module at (x, y) moves by
//! `(dx - y * dtheta, dy + x * dtheta)`, which stacks into an 8x3 linear
//! system. The chassis twist is its least-squares solution, so modules that
//! disagree (slip, sensor noise) are averaged rather than trusted one by one.

use super::{WheelKinematics, WheelPosition, WHEEL_COUNT};
use crate::error::{RobotStateError, RobotStateResult};
use crate::geometry::Twist2D;
use nalgebra::{SMatrix, SVector};

const MODULE_ROWS: usize = 2 * WHEEL_COUNT;

type InverseMatrix = SMatrix<f64, MODULE_ROWS, 3>;
type ForwardMatrix = SMatrix<f64, 3, MODULE_ROWS>;

/// Four-module swerve kinematics
#[derive(Debug, Clone, PartialEq)]
pub struct SwerveKinematics {
    module_locations: [[f64; 2]; WHEEL_COUNT],
    /// Pseudo-inverse of the module matrix
    forward: ForwardMatrix,
}

impl SwerveKinematics {
    /// Create swerve kinematics from module locations [x, y] in meters,
    /// measured from the robot center
    pub fn new(module_locations: [[f64; 2]; WHEEL_COUNT]) -> RobotStateResult<Self> {
        if module_locations.iter().flatten().any(|v| !v.is_finite()) {
            return Err(RobotStateError::InvalidKinematics(
                "module locations must be finite".to_string(),
            ));
        }

        let mut inverse = InverseMatrix::zeros();
        for (i, &[x, y]) in module_locations.iter().enumerate() {
            inverse[(2 * i, 0)] = 1.0;
            inverse[(2 * i, 2)] = -y;
            inverse[(2 * i + 1, 1)] = 1.0;
            inverse[(2 * i + 1, 2)] = x;
        }

        let transpose = inverse.transpose();
        let forward = (transpose * inverse)
            .try_inverse()
            .map(|normal_inverse| normal_inverse * transpose)
            .ok_or_else(|| {
                RobotStateError::InvalidKinematics(
                    "module layout cannot observe rotation".to_string(),
                )
            })?;

        Ok(Self {
            module_locations,
            forward,
        })
    }

    /// Rectangular layout with modules at (+-wheel_base/2, +-track_width/2),
    /// ordered front-left, front-right, back-left, back-right
    pub fn rectangular(wheel_base: f64, track_width: f64) -> RobotStateResult<Self> {
        let x = wheel_base / 2.0;
        let y = track_width / 2.0;
        Self::new([[x, y], [x, -y], [-x, y], [-x, -y]])
    }

    /// Module locations [x, y] in meters
    pub fn module_locations(&self) -> &[[f64; 2]; WHEEL_COUNT] {
        &self.module_locations
    }
}

impl WheelKinematics for SwerveKinematics {
    fn to_twist(
        &self,
        start: &[WheelPosition; WHEEL_COUNT],
        end: &[WheelPosition; WHEEL_COUNT],
    ) -> Twist2D {
        let mut module_deltas = SVector::<f64, MODULE_ROWS>::zeros();
        for (i, (before, after)) in start.iter().zip(end.iter()).enumerate() {
            let distance = after.distance - before.distance;
            let (dx, dy) = after.angle.rotate(distance, 0.0);
            module_deltas[2 * i] = dx;
            module_deltas[2 * i + 1] = dy;
        }

        let chassis = self.forward * module_deltas;
        Twist2D::new(chassis[0], chassis[1], chassis[2])
    }
}

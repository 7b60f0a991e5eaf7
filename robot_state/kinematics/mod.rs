//! Wheel-to-chassis kinematics
//!
//! Converts the change in four cumulative wheel readings into a single
//! chassis twist for the odometry integrator.
//!
//! # Available Models
//!
//! - **swerve**: Four independently steered modules, least-squares solve
//! - **differential**: Four-wheel skid steer (tank) drive

mod differential;
mod swerve;

pub use differential::DifferentialKinematics;
pub use swerve::SwerveKinematics;

use crate::geometry::{Rotation2D, Twist2D};
use serde::{Deserialize, Serialize};

/// Number of wheels reported in every odometry observation
pub const WHEEL_COUNT: usize = 4;

/// Cumulative reading of one wheel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelPosition {
    /// Distance rolled since startup in meters (signed)
    pub distance: f64,
    /// Direction the wheel is pointing, relative to the chassis
    pub angle: Rotation2D,
}

impl WheelPosition {
    pub fn new(distance: f64, angle: Rotation2D) -> Self {
        Self { distance, angle }
    }

    /// A fixed, forward-pointing wheel
    pub fn straight(distance: f64) -> Self {
        Self::new(distance, Rotation2D::ZERO)
    }
}

/// Maps wheel motion to chassis motion
pub trait WheelKinematics {
    /// Chassis twist between two sets of cumulative wheel readings
    ///
    /// Must be a deterministic, pure function of its inputs.
    fn to_twist(
        &self,
        start: &[WheelPosition; WHEEL_COUNT],
        end: &[WheelPosition; WHEEL_COUNT],
    ) -> Twist2D;
}

impl<K: WheelKinematics + ?Sized> WheelKinematics for Box<K> {
    fn to_twist(
        &self,
        start: &[WheelPosition; WHEEL_COUNT],
        end: &[WheelPosition; WHEEL_COUNT],
    ) -> Twist2D {
        (**self).to_twist(start, end)
    }
}

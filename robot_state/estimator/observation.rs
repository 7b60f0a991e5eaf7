use crate::geometry::{Pose3D, Rotation2D};
use crate::kinematics::{WheelPosition, WHEEL_COUNT};
use serde::{Deserialize, Serialize};

/// One control cycle of drive sensor data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdometryObservation {
    /// Sample time in seconds
    pub timestamp: f64,
    /// Cumulative wheel readings
    pub wheel_positions: [WheelPosition; WHEEL_COUNT],
    /// Raw gyro heading, if the gyro was read this cycle
    pub gyro_angle: Option<Rotation2D>,
}

impl OdometryObservation {
    pub fn new(
        timestamp: f64,
        wheel_positions: [WheelPosition; WHEEL_COUNT],
        gyro_angle: Option<Rotation2D>,
    ) -> Self {
        Self {
            timestamp,
            wheel_positions,
            gyro_angle,
        }
    }

    /// Check the timestamp, wheel readings and gyro angle are all finite
    pub fn is_valid(&self) -> bool {
        self.timestamp.is_finite()
            && self
                .wheel_positions
                .iter()
                .all(|wheel| wheel.distance.is_finite() && wheel.angle.radians().is_finite())
            && self
                .gyro_angle
                .map_or(true, |gyro| gyro.radians().is_finite())
    }
}

/// Absolute pose fix from the vision subsystem
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionObservation {
    /// Time the camera frame was captured, in seconds
    pub timestamp: f64,
    /// Robot pose in the field frame
    pub vision_pose: Pose3D,
    /// Measurement standard deviations (x m, y m, theta rad)
    pub std_devs: [f64; 3],
}

impl VisionObservation {
    pub fn new(timestamp: f64, vision_pose: Pose3D, std_devs: [f64; 3]) -> Self {
        Self {
            timestamp,
            vision_pose,
            std_devs,
        }
    }

    /// Check the observation carries usable numbers
    ///
    /// Infinite standard deviations are allowed; they produce a zero gain.
    pub fn is_valid(&self) -> bool {
        self.timestamp.is_finite()
            && self.vision_pose.is_valid()
            && self.std_devs.iter().all(|s| !s.is_nan())
    }
}

/// What happened to a vision observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisionOutcome {
    /// The correction was applied to the estimate
    Applied,
    /// Older than the history window, or no history yet
    Stale,
    /// No odometry sample could be found for the timestamp
    NoSample,
    /// Non-finite pose or timestamp, or NaN standard deviation
    Invalid,
}

impl VisionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, VisionOutcome::Applied)
    }
}

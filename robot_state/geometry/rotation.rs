use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::ops::{Add, Neg, Sub};

/// Wrap an angle into (-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Planar heading in radians, always kept in (-pi, pi]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Rotation2D {
    radians: f64,
}

impl Rotation2D {
    /// Zero heading
    pub const ZERO: Rotation2D = Rotation2D { radians: 0.0 };

    /// Create a rotation from radians
    pub fn from_radians(radians: f64) -> Self {
        Self {
            radians: normalize_angle(radians),
        }
    }

    /// Create a rotation from degrees
    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    /// Heading in radians
    pub fn radians(&self) -> f64 {
        self.radians
    }

    /// Heading in degrees
    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }

    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    /// Rotate the vector (x, y) counter-clockwise by this heading
    pub fn rotate(&self, x: f64, y: f64) -> (f64, f64) {
        let (sin, cos) = self.radians.sin_cos();
        (x * cos - y * sin, x * sin + y * cos)
    }
}

impl From<f64> for Rotation2D {
    fn from(radians: f64) -> Self {
        Self::from_radians(radians)
    }
}

impl From<Rotation2D> for f64 {
    fn from(rotation: Rotation2D) -> Self {
        rotation.radians
    }
}

impl Add for Rotation2D {
    type Output = Rotation2D;

    fn add(self, other: Rotation2D) -> Rotation2D {
        Rotation2D::from_radians(self.radians + other.radians)
    }
}

impl Sub for Rotation2D {
    type Output = Rotation2D;

    fn sub(self, other: Rotation2D) -> Rotation2D {
        Rotation2D::from_radians(self.radians - other.radians)
    }
}

impl Neg for Rotation2D {
    type Output = Rotation2D;

    fn neg(self) -> Rotation2D {
        Rotation2D::from_radians(-self.radians)
    }
}

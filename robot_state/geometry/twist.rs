use serde::{Deserialize, Serialize};

/// Tangent-space motion increment
///
/// `dx`/`dy` are expressed in the local frame at the start of the motion, so
/// a twist with non-zero `dtheta` describes an arc rather than a straight
/// segment followed by a turn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Twist2D {
    /// Forward displacement in meters
    pub dx: f64,
    /// Leftward displacement in meters
    pub dy: f64,
    /// Heading change in radians
    pub dtheta: f64,
}

impl Twist2D {
    /// Create a new twist
    pub fn new(dx: f64, dy: f64, dtheta: f64) -> Self {
        Self { dx, dy, dtheta }
    }

    /// No motion
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale every component by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.dx * factor, self.dy * factor, self.dtheta * factor)
    }

    /// Scale each component by its own gain, ordered (x, y, theta)
    pub fn scale_axes(&self, gains: [f64; 3]) -> Self {
        Self::new(
            self.dx * gains[0],
            self.dy * gains[1],
            self.dtheta * gains[2],
        )
    }

    /// Components as (x, y, theta)
    pub fn to_array(&self) -> [f64; 3] {
        [self.dx, self.dy, self.dtheta]
    }

    /// Check if all values are finite
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.dtheta.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_axes() {
        let twist = Twist2D::new(2.0, -4.0, 1.0);
        let scaled = twist.scale_axes([0.5, 0.25, 0.0]);
        assert_eq!(scaled, Twist2D::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn test_validity() {
        assert!(Twist2D::new(1.0, 0.0, 0.1).is_valid());
        assert!(!Twist2D::new(f64::NAN, 0.0, 0.0).is_valid());
    }
}

use super::rotation::{normalize_angle, Rotation2D};
use super::twist::Twist2D;
use serde::{Deserialize, Serialize};

/// Below this magnitude the exp/log maps switch to their series expansions
const SMALL_ANGLE: f64 = 1e-9;

/// 2D pose representation (position and orientation)
///
/// `theta` is kept in (-pi, pi] by every constructor and operation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Orientation angle in radians
    pub theta: f64,
}

impl Pose2D {
    /// Create a new 2D pose
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Create pose at origin
    pub fn origin() -> Self {
        Self::default()
    }

    /// Create a pose from a position and a heading
    pub fn from_rotation(x: f64, y: f64, rotation: Rotation2D) -> Self {
        Self::new(x, y, rotation.radians())
    }

    /// Heading as a rotation
    pub fn rotation(&self) -> Rotation2D {
        Rotation2D::from_radians(self.theta)
    }

    /// Same position, different heading
    pub fn with_rotation(&self, rotation: Rotation2D) -> Self {
        Self::from_rotation(self.x, self.y, rotation)
    }

    /// Calculate euclidean distance to another pose
    pub fn distance_to(&self, other: &Pose2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Apply `other` in this pose's frame
    pub fn compose(&self, other: &Pose2D) -> Pose2D {
        let (dx, dy) = self.rotation().rotate(other.x, other.y);
        Pose2D::new(self.x + dx, self.y + dy, self.theta + other.theta)
    }

    /// The pose that composes with this one to give the origin
    pub fn inverse(&self) -> Pose2D {
        let (sin, cos) = self.theta.sin_cos();
        Pose2D::new(
            -self.x * cos - self.y * sin,
            self.x * sin - self.y * cos,
            -self.theta,
        )
    }

    /// This pose expressed in the frame of `origin`
    pub fn relative_to(&self, origin: &Pose2D) -> Pose2D {
        origin.inverse().compose(self)
    }

    /// Logarithm map: the local-frame twist that carries `self` to `end`
    pub fn delta(&self, end: &Pose2D) -> Twist2D {
        let transform = end.relative_to(self);
        let dtheta = transform.theta;
        let half_dtheta = dtheta / 2.0;
        let cos_minus_one = dtheta.cos() - 1.0;

        let half_theta_by_tan = if cos_minus_one.abs() < SMALL_ANGLE {
            1.0 - dtheta * dtheta / 12.0
        } else {
            -(half_dtheta * dtheta.sin()) / cos_minus_one
        };

        Twist2D::new(
            transform.x * half_theta_by_tan + transform.y * half_dtheta,
            -transform.x * half_dtheta + transform.y * half_theta_by_tan,
            dtheta,
        )
    }

    /// Exponential map: advance this pose along a local-frame twist
    pub fn apply(&self, twist: &Twist2D) -> Pose2D {
        let dtheta = twist.dtheta;
        let (sin_theta, cos_theta) = dtheta.sin_cos();

        let (s, c) = if dtheta.abs() < SMALL_ANGLE {
            (1.0 - dtheta * dtheta / 6.0, 0.5 * dtheta)
        } else {
            (sin_theta / dtheta, (1.0 - cos_theta) / dtheta)
        };

        let step = Pose2D::new(
            twist.dx * s - twist.dy * c,
            twist.dx * c + twist.dy * s,
            dtheta,
        );
        self.compose(&step)
    }

    /// Move along the arc from `self` to `end`; `t` is clamped to [0, 1]
    pub fn interpolate(&self, end: &Pose2D, t: f64) -> Pose2D {
        if t <= 0.0 {
            *self
        } else if t >= 1.0 {
            *end
        } else {
            self.apply(&self.delta(end).scale(t))
        }
    }

    /// Check if values are finite
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_pose_eq(actual: &Pose2D, expected: &Pose2D) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-9);
        let heading_error = normalize_angle(actual.theta - expected.theta);
        assert!(heading_error.abs() < 1e-9, "heading error {heading_error}");
    }

    fn random_pose(rng: &mut StdRng) -> Pose2D {
        Pose2D::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-PI..PI),
        )
    }

    #[test]
    fn test_new_normalizes_heading() {
        let pose = Pose2D::new(1.0, 2.0, 2.0 * PI + 0.5);
        assert_relative_eq!(pose.theta, 0.5, epsilon = 1e-12);
        assert_relative_eq!(Pose2D::new(0.0, 0.0, -PI).theta, PI);
    }

    #[test]
    fn test_compose_in_local_frame() {
        let facing_left = Pose2D::new(1.0, 0.0, FRAC_PI_2);
        let forward = Pose2D::new(1.0, 0.0, 0.0);
        assert_pose_eq(&facing_left.compose(&forward), &Pose2D::new(1.0, 1.0, FRAC_PI_2));
    }

    #[test]
    fn test_compose_is_not_commutative() {
        let a = Pose2D::new(1.0, 0.0, FRAC_PI_2);
        let b = Pose2D::new(2.0, 0.0, 0.0);
        assert!(a.compose(&b).distance_to(&b.compose(&a)) > 1.0);
    }

    #[test]
    fn test_compose_is_associative() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let a = random_pose(&mut rng);
            let b = random_pose(&mut rng);
            let c = random_pose(&mut rng);
            assert_pose_eq(&a.compose(&b).compose(&c), &a.compose(&b.compose(&c)));
        }
    }

    #[test]
    fn test_inverse() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let pose = random_pose(&mut rng);
            assert_pose_eq(&pose.compose(&pose.inverse()), &Pose2D::origin());
            assert_pose_eq(&pose.inverse().compose(&pose), &Pose2D::origin());
        }
    }

    #[test]
    fn test_relative_to() {
        let origin = Pose2D::new(1.0, 1.0, FRAC_PI_2);
        let target = Pose2D::new(1.0, 3.0, PI);
        assert_pose_eq(&target.relative_to(&origin), &Pose2D::new(2.0, 0.0, FRAC_PI_2));
    }

    #[test]
    fn test_apply_delta_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let a = random_pose(&mut rng);
            let b = random_pose(&mut rng);
            assert_pose_eq(&a.apply(&a.delta(&b)), &b);
        }
    }

    #[test]
    fn test_round_trip_across_heading_wrap() {
        let a = Pose2D::new(0.0, 0.0, PI - 0.05);
        let b = Pose2D::new(0.3, 0.1, -PI + 0.05);
        let twist = a.delta(&b);
        assert_relative_eq!(twist.dtheta, 0.1, epsilon = 1e-9);
        assert_pose_eq(&a.apply(&twist), &b);
    }

    #[test]
    fn test_straight_line_twist() {
        let start = Pose2D::new(1.0, 1.0, FRAC_PI_2);
        let end = start.apply(&Twist2D::new(2.0, 0.0, 0.0));
        assert_pose_eq(&end, &Pose2D::new(1.0, 3.0, FRAC_PI_2));
    }

    #[test]
    fn test_arc_twist() {
        // Quarter circle of radius 1 turning left
        let end = Pose2D::origin().apply(&Twist2D::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        assert_pose_eq(&end, &Pose2D::new(1.0, 1.0, FRAC_PI_2));
    }

    #[test]
    fn test_small_angle_series() {
        let start = Pose2D::new(0.5, -0.5, 0.2);
        let end = start.apply(&Twist2D::new(0.1, 0.0, 1e-12));
        assert_relative_eq!(start.delta(&end).dx, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_interpolate() {
        let a = Pose2D::new(0.0, 0.0, 0.0);
        let b = Pose2D::new(2.0, 0.0, 0.0);
        assert_pose_eq(&a.interpolate(&b, 0.5), &Pose2D::new(1.0, 0.0, 0.0));
        assert_eq!(a.interpolate(&b, -1.0), a);
        assert_eq!(a.interpolate(&b, 2.0), b);
    }
}

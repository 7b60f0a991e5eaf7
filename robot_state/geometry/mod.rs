//! Planar rigid-body geometry
//!
//! Poses, headings and the exponential/logarithm maps between a pose and
//! its tangent twist. Headings are always wrapped to (-pi, pi].
//!
//! # Example
//!
//! ```rust
//! use robot_state::geometry::{Pose2D, Twist2D};
//!
//! let start = Pose2D::new(1.0, 0.0, std::f64::consts::FRAC_PI_2);
//! let end = start.apply(&Twist2D::new(1.0, 0.0, 0.0));
//!
//! // The log map recovers the twist that was applied
//! let twist = start.delta(&end);
//! assert!((twist.dx - 1.0).abs() < 1e-9);
//! ```

mod pose;
mod pose3d;
mod rotation;
mod speeds;
mod twist;

pub use pose::Pose2D;
pub use pose3d::Pose3D;
pub use rotation::{normalize_angle, Rotation2D};
pub use speeds::ChassisSpeeds;
pub use twist::Twist2D;

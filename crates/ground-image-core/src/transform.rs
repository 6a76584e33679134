//! Rigid poses and the frame-resolution capability.

use std::time::Duration;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A point in time on the host clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The clock origin.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Creates a timestamp from seconds since the clock origin.
    ///
    /// Negative or non-finite input saturates to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        Self(Duration::try_from_secs_f64(secs).unwrap_or_default())
    }

    pub fn from_duration(d: Duration) -> Self {
        Self(d)
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Returns this timestamp advanced by `secs` seconds.
    #[must_use]
    pub fn advanced_by(self, secs: f32) -> Self {
        Self(self.0 + Duration::try_from_secs_f32(secs).unwrap_or_default())
    }
}

/// A rigid transform: orientation followed by translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Creates a pose from its components.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// The identity pose.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    /// Creates a pure translation.
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }

    /// Composes `self * child`: `child` is expressed in the frame of `self`.
    #[must_use]
    pub fn compose(&self, child: &Pose) -> Pose {
        Pose {
            position: self.position + self.orientation * child.position,
            orientation: (self.orientation * child.orientation).normalize(),
        }
    }

    /// The inverse transform.
    #[must_use]
    pub fn inverse(&self) -> Pose {
        let inv = self.orientation.inverse();
        Pose {
            position: inv * -self.position,
            orientation: inv,
        }
    }

    /// Applies the pose to a point.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.orientation * point
    }

    /// Converts this pose to a Mat4.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}

/// Resolves named frames into poses relative to the host's fixed frame.
pub trait TransformResolver {
    /// Name of the frame every pose is expressed in. Used in diagnostics.
    fn fixed_frame(&self) -> &str;

    /// Pose of `frame` in the fixed frame at `time`, if resolvable.
    fn resolve(&self, frame: &str, time: Timestamp) -> Option<Pose>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_compose_and_inverse() {
        let a = Pose::new(
            Vec3::new(1.0, 2.0, 0.0),
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        );
        let b = Pose::from_translation(Vec3::new(1.0, 0.0, 0.0));

        let ab = a.compose(&b);
        assert!(approx_eq(ab.position, Vec3::new(1.0, 3.0, 0.0)));

        let back = a.inverse().compose(&ab);
        assert!(approx_eq(back.position, b.position));
        assert!(back.orientation.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn test_transform_point_matches_matrix() {
        let pose = Pose::new(Vec3::new(0.5, -1.0, 2.0), Quat::from_rotation_x(0.3));
        let p = Vec3::new(2.0, 3.0, -1.0);
        assert!(approx_eq(
            pose.transform_point(p),
            pose.to_matrix().transform_point3(p)
        ));
    }

    #[test]
    fn test_timestamp_advance() {
        let t = Timestamp::from_secs_f64(1.5).advanced_by(0.5);
        assert!((t.as_secs_f64() - 2.0).abs() < 1e-6);
        assert_eq!(Timestamp::from_secs_f64(-1.0), Timestamp::ZERO);
        assert_eq!(Timestamp::ZERO.advanced_by(f32::NAN), Timestamp::ZERO);
    }
}

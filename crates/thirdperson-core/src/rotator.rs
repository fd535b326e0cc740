//! Degree-based pitch/yaw/roll rotation
//!
//! Z is up, X is forward and Y is right. Positive pitch looks up, positive yaw
//! turns from +X towards +Y.

use std::ops::{Add, Neg, Sub};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rotation expressed as Euler angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    /// Rotation around the right axis (looking up/down)
    pub pitch: f32,
    /// Rotation around the up axis (turning left/right)
    pub yaw: f32,
    /// Rotation around the forward axis
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator::new(0.0, 0.0, 0.0);

    /// Create a rotator from pitch, yaw and roll in degrees
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Create a rotator that only turns around the up axis
    pub const fn from_yaw(yaw: f32) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// Copy of this rotator with pitch and roll discarded
    pub fn yaw_only(&self) -> Self {
        Self::from_yaw(self.yaw)
    }

    /// Unit vector along the rotated X axis
    pub fn forward_vector(&self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }

    /// Unit vector along the rotated Y axis
    pub fn right_vector(&self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();
        Vec3::new(
            sr * sp * cy - cr * sy,
            sr * sp * sy + cr * cy,
            -sr * cp,
        )
    }

    /// Unit vector along the rotated Z axis
    pub fn up_vector(&self) -> Vec3 {
        self.forward_vector().cross(self.right_vector())
    }

    /// Convert to a quaternion (yaw, then pitch, then roll)
    pub fn to_quat(&self) -> Quat {
        Quat::from_rotation_z(self.yaw.to_radians())
            * Quat::from_rotation_y(-self.pitch.to_radians())
            * Quat::from_rotation_x(-self.roll.to_radians())
    }

    /// Wrap a single angle into (-180, 180]
    pub fn normalize_axis(angle: f32) -> f32 {
        let mut angle = angle % 360.0;
        if angle > 180.0 {
            angle -= 360.0;
        } else if angle <= -180.0 {
            angle += 360.0;
        }
        angle
    }

    /// Copy of this rotator with every axis wrapped into (-180, 180]
    pub fn normalized(&self) -> Self {
        Self::new(
            Self::normalize_axis(self.pitch),
            Self::normalize_axis(self.yaw),
            Self::normalize_axis(self.roll),
        )
    }

    /// Compare two rotators axis by axis, treating wrapped angles as equal
    pub fn equals(&self, other: &Rotator, tolerance: f32) -> bool {
        let diff = (*self - *other).normalized();
        diff.pitch.abs() <= tolerance && diff.yaw.abs() <= tolerance && diff.roll.abs() <= tolerance
    }

    /// Check whether every axis is within tolerance of zero
    pub fn is_nearly_zero(&self, tolerance: f32) -> bool {
        self.equals(&Rotator::ZERO, tolerance)
    }
}

impl Add for Rotator {
    type Output = Rotator;

    fn add(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

impl Sub for Rotator {
    type Output = Rotator;

    fn sub(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch - rhs.pitch, self.yaw - rhs.yaw, self.roll - rhs.roll)
    }
}

impl Neg for Rotator {
    type Output = Rotator;

    fn neg(self) -> Rotator {
        Rotator::new(-self.pitch, -self.yaw, -self.roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_forward_vector_axes() {
        assert_vec_near(Rotator::ZERO.forward_vector(), Vec3::X);
        assert_vec_near(Rotator::from_yaw(90.0).forward_vector(), Vec3::Y);
        assert_vec_near(Rotator::new(90.0, 0.0, 0.0).forward_vector(), Vec3::Z);
    }

    #[test]
    fn test_right_vector_yaw_only() {
        assert_vec_near(Rotator::ZERO.right_vector(), Vec3::Y);
        assert_vec_near(Rotator::from_yaw(90.0).right_vector(), -Vec3::X);
    }

    #[test]
    fn test_quat_matches_basis_vectors() {
        let rot = Rotator::new(20.0, 135.0, 10.0);
        let quat = rot.to_quat();
        assert_vec_near(quat * Vec3::X, rot.forward_vector());
        assert_vec_near(quat * Vec3::Y, rot.right_vector());
        assert_vec_near(quat * Vec3::Z, rot.up_vector());
    }

    #[test]
    fn test_add_is_component_wise() {
        let sum = Rotator::new(10.0, 170.0, 0.0) + Rotator::new(-5.0, 20.0, 1.0);
        assert_eq!(sum, Rotator::new(5.0, 190.0, 1.0));
    }

    #[test]
    fn test_normalize_axis() {
        assert_eq!(Rotator::normalize_axis(190.0), -170.0);
        assert_eq!(Rotator::normalize_axis(-180.0), 180.0);
        assert_eq!(Rotator::normalize_axis(720.0), 0.0);
        assert!(Rotator::new(0.0, 360.0, 0.0).is_nearly_zero(1e-4));
    }
}

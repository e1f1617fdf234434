//! Rigid transforms for anchors and placed units

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, orientation and scale in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Map a point from this transform's local frame (rotation only, no scale)
    #[inline]
    pub fn local_offset(&self, offset: Vec3) -> Vec3 {
        self.translation + self.rotation * offset
    }

    /// Rotate about `axis` through `pivot`, turning both position and orientation
    pub fn rotate_around(&mut self, pivot: Vec3, axis: Vec3, angle: f32) {
        let q = Quat::from_axis_angle(axis, angle);
        self.translation = pivot + q * (self.translation - pivot);
        self.rotation = q * self.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_around_quarter_turn() {
        let mut t = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        t.rotate_around(Vec3::new(0.0, 5.0, 0.0), Vec3::Y, FRAC_PI_2);
        // +X swings to -Z about the vertical axis; height is untouched
        assert!((t.translation - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
        assert!((t.rotation * Vec3::X - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_local_offset_follows_rotation() {
        let t = Transform {
            translation: Vec3::new(2.0, 1.0, 0.0),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            scale: Vec3::ONE,
        };
        let p = t.local_offset(Vec3::X);
        assert!((p - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-6);
    }
}

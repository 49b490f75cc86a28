/*!
Core data types and math aliases shared by the controller modules.

This module contains no algorithms. It defines the values exchanged between
the host (input polling, collision sweep, overlap query) and the per-frame
controller update.
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// World-space pose of the controlled entity.
///
/// The host owns the pose; the controller mutates it once per frame
/// (translation after the move, rotation when facing is enabled).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Pose at `translation` with identity rotation.
    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity())
    }

    /// Convert to nalgebra `Isometry3` for use with Rapier queries.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(
            na::Translation3::new(self.translation.x, self.translation.y, self.translation.z),
            self.rotation,
        )
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::from_translation(Vec3::zeros())
    }
}

/// Capsule specification for the character's collision shape.
///
/// half_height is the half-length of the cylinder section (aligned with +Y),
/// so the total capsule height is 2*half_height + 2*radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleSpec {
    pub radius: f32,
    pub half_height: f32,
}

impl CapsuleSpec {
    #[inline]
    pub const fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
        }
    }

    /// Total height from the bottom of the lower cap to the top of the upper cap.
    #[inline]
    pub fn height(&self) -> f32 {
        2.0 * (self.half_height + self.radius)
    }
}

/// One frame of raw player input.
///
/// Axes are raw (no smoothing, no deadzone). `jump_pressed` must only be true
/// on the frame the jump button went down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Left/right axis in [-1, 1].
    pub horizontal: f32,
    /// Forward/back axis in [-1, 1].
    pub vertical: f32,
    pub jump_pressed: bool,
}

impl InputSnapshot {
    pub fn new(horizontal: f32, vertical: f32, jump_pressed: bool) -> Self {
        Self {
            horizontal,
            vertical,
            jump_pressed,
        }
    }

    /// Snapshot with both axes clamped to [-1, 1]. Non-finite axes read as 0.
    pub fn clamped(self) -> Self {
        Self {
            horizontal: clamp_axis(self.horizontal),
            vertical: clamp_axis(self.vertical),
            jump_pressed: self.jump_pressed,
        }
    }
}

#[inline]
fn clamp_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

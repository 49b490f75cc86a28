//! Host collaborator abstraction.
//!
//! The controller never touches a physics engine directly. The host supplies
//! a collision-aware mover and a sphere overlap query through these traits,
//! which lets tests substitute simple doubles and lets any engine (Rapier,
//! a custom sweep, a server-side world) drive the same controller.

use crate::{
    layers::LayerMask,
    types::{Pose, Vec3},
};

/// Moves the character through the world, resolving collisions.
pub trait CharacterMover {
    /// Attempt to move the character at `pose` by `displacement`.
    ///
    /// Returns the displacement actually applied after collision resolution.
    /// The caller adds it to the pose; implementations must not mutate the
    /// pose themselves.
    fn move_character(&mut self, pose: &Pose, displacement: Vec3) -> Vec3;
}

/// Answers "is anything solid inside this sphere?".
pub trait GroundProbe {
    /// True if any non-trigger collider on a layer in `mask` overlaps the
    /// sphere at `center` with `radius`.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;
}

impl<T: CharacterMover + ?Sized> CharacterMover for &mut T {
    fn move_character(&mut self, pose: &Pose, displacement: Vec3) -> Vec3 {
        (**self).move_character(pose, displacement)
    }
}

impl<T: GroundProbe + ?Sized> GroundProbe for &T {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        (**self).overlap_sphere(center, radius, mask)
    }
}

/// Mover for an empty world: every displacement is applied unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeSpaceMover;

impl CharacterMover for FreeSpaceMover {
    fn move_character(&mut self, _pose: &Pose, displacement: Vec3) -> Vec3 {
        displacement
    }
}

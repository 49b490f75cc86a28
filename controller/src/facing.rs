use nalgebra as na;

use crate::{
    constants::{FACING_MIN_SPEED_SQ, SLERP_EPS},
    types::{Quat, Vec3},
};

/// Rotation whose local +Z looks along the planar part of `velocity`, with +Y up.
///
/// Returns `None` if the planar speed is too small to define a direction.
#[inline]
pub fn look_along_planar(velocity: Vec3) -> Option<Quat> {
    let look_dir = Vec3::new(velocity.x, 0.0, velocity.z);
    if look_dir.norm_squared() <= FACING_MIN_SPEED_SQ {
        return None;
    }
    Some(Quat::face_towards(&look_dir, &na::Vector3::y()))
}

/// Spherically interpolate `current` toward `target` by `rate * dt`, clamped to [0, 1].
///
/// When the interpolation is undefined (opposite orientations), snap to `target`.
#[inline]
pub fn turn_towards(current: Quat, target: Quat, rate: f32, dt_seconds: f32) -> Quat {
    let t = (rate * dt_seconds).clamp(0.0, 1.0);
    current.try_slerp(&target, t, SLERP_EPS).unwrap_or(target)
}

//! Pure per-frame motion math: direction selection, speed scaling, jump launch
//! and gravity integration.
//!
//! Nothing here touches the host. [`crate::controller::RailController`] composes
//! these in a fixed order; keep that order when changing them.

use crate::{
    config::AxisLock,
    constants::GROUNDED_VERTICAL_VELOCITY,
    types::{InputSnapshot, Vec3},
};

/// Planar (XZ) movement direction for this frame.
///
/// - `LockZ` uses only the horizontal axis to drive X.
/// - `LockX` uses only the vertical axis to drive Z.
///
/// The unused axis is discarded. The result is normalized, or zero when
/// there is no input.
#[inline]
pub fn planar_direction(lock_axis: AxisLock, input: &InputSnapshot) -> Vec3 {
    let raw = match lock_axis {
        AxisLock::LockZ => Vec3::new(input.horizontal, 0.0, 0.0),
        AxisLock::LockX => Vec3::new(0.0, 0.0, input.vertical),
    };
    raw.try_normalize(0.0).unwrap_or_else(Vec3::zeros)
}

/// Horizontal velocity for a direction, applying air control when airborne.
#[inline]
pub fn horizontal_velocity(
    direction: Vec3,
    move_speed: f32,
    grounded: bool,
    air_control: f32,
) -> Vec3 {
    let control = if grounded { 1.0 } else { air_control };
    direction * move_speed * control
}

/// Initial upward speed needed to reach `jump_height` under constant `gravity` (negative).
#[inline]
pub fn jump_launch_speed(jump_height: f32, gravity: f32) -> f32 {
    (jump_height * -2.0 * gravity).sqrt()
}

/// Keep a grounded character pressed down instead of letting downward speed grow.
#[inline]
pub fn settle_on_ground(vertical_velocity: f32, grounded: bool) -> f32 {
    if grounded && vertical_velocity < 0.0 {
        GROUNDED_VERTICAL_VELOCITY
    } else {
        vertical_velocity
    }
}

/// Semi-implicit Euler step: v(t+dt) = v(t) + g*dt.
#[inline]
pub fn integrate_gravity(vertical_velocity: f32, gravity: f32, dt_seconds: f32) -> f32 {
    vertical_velocity + gravity * dt_seconds
}

/// Full velocity from the horizontal part and the vertical speed.
#[inline]
pub fn compose_velocity(horizontal: Vec3, vertical_velocity: f32) -> Vec3 {
    Vec3::new(horizontal.x, vertical_velocity, horizontal.z)
}

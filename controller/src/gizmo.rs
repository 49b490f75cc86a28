//! Debug-draw geometry.
//!
//! Pure data for hosts that want to visualize the rail/plane and the ground
//! sphere. Drawing itself (colors, line primitives) is left to the host.

use crate::{config::AxisLock, constants::RAIL_GIZMO_EXTENT, types::Vec3};

/// Line segment along the free axis, at the locked coordinate and height `y`.
pub fn rail_segment(lock_axis: AxisLock, lock_value: f32, y: f32) -> (Vec3, Vec3) {
    match lock_axis {
        AxisLock::LockZ => (
            Vec3::new(-RAIL_GIZMO_EXTENT, y, lock_value),
            Vec3::new(RAIL_GIZMO_EXTENT, y, lock_value),
        ),
        AxisLock::LockX => (
            Vec3::new(lock_value, y, -RAIL_GIZMO_EXTENT),
            Vec3::new(lock_value, y, RAIL_GIZMO_EXTENT),
        ),
    }
}

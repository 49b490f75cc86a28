/*!
Controller tuning constants and authoring defaults.

Distances are in meters, time in seconds. The `DEFAULT_*` values are what a
freshly authored [`crate::ControllerConfig`] starts with.
*/

/// Vertical speed applied while grounded and falling (m/s).
/// Keeps the character pressed onto the ground instead of hovering at exactly zero.
pub const GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;

/// Minimum squared horizontal speed before facing is updated ((m/s)^2).
pub const FACING_MIN_SPEED_SQ: f32 = 1.0e-4;

/// Extra height of the derived ground anchor above the capsule's skin (meters).
pub const GROUND_ANCHOR_CLEARANCE: f32 = 0.05;

/// Half-length of the rail/plane line drawn by debug gizmos (meters).
pub const RAIL_GIZMO_EXTENT: f32 = 999.0;

/// Quaternions closer than this are treated as antipodal when interpolating.
pub const SLERP_EPS: f32 = 1.0e-6;

pub const DEFAULT_MOVE_SPEED: f32 = 6.0;
pub const DEFAULT_ROTATION_SMOOTHING: f32 = 12.0;
pub const DEFAULT_JUMP_HEIGHT: f32 = 2.0;
/// Downward acceleration (m/s^2). Negative by convention.
pub const DEFAULT_GRAVITY: f32 = -25.0;
pub const DEFAULT_AIR_CONTROL: f32 = 0.6;
pub const DEFAULT_GROUND_RADIUS: f32 = 0.25;
/// Collision skin of the character shape, used to place the derived ground anchor.
pub const DEFAULT_SKIN_WIDTH: f32 = 0.08;

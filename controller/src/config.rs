/*!
Authoring-time configuration for the rail controller.

These values are set by level designers or game data before simulation
starts. The controller never mutates them.
*/

use crate::{
    constants::{
        DEFAULT_AIR_CONTROL, DEFAULT_GRAVITY, DEFAULT_GROUND_RADIUS, DEFAULT_JUMP_HEIGHT,
        DEFAULT_MOVE_SPEED, DEFAULT_ROTATION_SMOOTHING, DEFAULT_SKIN_WIDTH,
    },
    layers::LayerMask,
    types::Vec3,
};

/// Which world axis is frozen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisLock {
    /// Side-scroller: Z is frozen, horizontal input moves along X.
    #[default]
    LockZ,
    /// Rail: X is frozen, vertical input moves along Z.
    LockX,
}

impl AxisLock {
    /// Read the locked coordinate from a world position.
    #[inline]
    pub fn locked_coord(self, position: &Vec3) -> f32 {
        match self {
            AxisLock::LockZ => position.z,
            AxisLock::LockX => position.x,
        }
    }

    /// Overwrite the locked coordinate of a world position.
    #[inline]
    pub fn pin(self, position: &mut Vec3, value: f32) {
        match self {
            AxisLock::LockZ => position.z = value,
            AxisLock::LockX => position.x = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    pub lock_axis: AxisLock,
    /// Frozen coordinate for the locked axis.
    ///
    /// `None` derives it from the spawn position. `Some(0.0)` really means zero.
    pub lock_value: Option<f32>,

    pub move_speed: f32,
    pub rotation_smoothing: f32,
    pub face_along_movement: bool,

    pub jump_height: f32,
    pub gravity: f32,
    /// Horizontal control multiplier while airborne, in [0, 1].
    pub air_control: f32,

    pub ground_radius: f32,
    pub ground_mask: LayerMask,
    /// Foot anchor in entity-local space. `None` derives it from the capsule.
    pub ground_anchor: Option<Vec3>,
    pub skin_width: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            lock_axis: AxisLock::LockZ,
            lock_value: None,
            move_speed: DEFAULT_MOVE_SPEED,
            rotation_smoothing: DEFAULT_ROTATION_SMOOTHING,
            face_along_movement: true,
            jump_height: DEFAULT_JUMP_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            air_control: DEFAULT_AIR_CONTROL,
            ground_radius: DEFAULT_GROUND_RADIUS,
            ground_mask: LayerMask::all(),
            ground_anchor: None,
            skin_width: DEFAULT_SKIN_WIDTH,
        }
    }
}

impl ControllerConfig {
    pub fn with_lock_axis(mut self, lock_axis: AxisLock) -> Self {
        self.lock_axis = lock_axis;
        self
    }

    pub fn with_lock_value(mut self, lock_value: f32) -> Self {
        self.lock_value = Some(lock_value);
        self
    }

    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    pub fn with_rotation_smoothing(mut self, rotation_smoothing: f32) -> Self {
        self.rotation_smoothing = rotation_smoothing;
        self
    }

    pub fn with_face_along_movement(mut self, enabled: bool) -> Self {
        self.face_along_movement = enabled;
        self
    }

    pub fn with_jump(mut self, jump_height: f32, gravity: f32) -> Self {
        self.jump_height = jump_height;
        self.gravity = gravity;
        self
    }

    pub fn with_air_control(mut self, air_control: f32) -> Self {
        self.air_control = air_control;
        self
    }

    pub fn with_ground_check(mut self, radius: f32, mask: LayerMask) -> Self {
        self.ground_radius = radius;
        self.ground_mask = mask;
        self
    }

    pub fn with_ground_anchor(mut self, anchor: Vec3) -> Self {
        self.ground_anchor = Some(anchor);
        self
    }

    /// Sanity-check authored values.
    ///
    /// The per-frame update never calls this; it trusts its inputs. Hosts may
    /// call it once at spawn to surface authoring mistakes.
    pub fn validate(&self) -> Result<(), &'static str> {
        let scalars = [
            self.move_speed,
            self.rotation_smoothing,
            self.jump_height,
            self.gravity,
            self.air_control,
            self.ground_radius,
            self.skin_width,
        ];
        if scalars.iter().any(|v| !v.is_finite()) {
            return Err("Controller config contains a non-finite value");
        }
        if self.lock_value.is_some_and(|v| !v.is_finite()) {
            return Err("Lock value is not finite");
        }
        if self.move_speed < 0.0 {
            return Err("Move speed must be non-negative");
        }
        if self.rotation_smoothing < 0.0 {
            return Err("Rotation smoothing must be non-negative");
        }
        if self.jump_height < 0.0 {
            return Err("Jump height must be non-negative");
        }
        if self.gravity >= 0.0 {
            return Err("Gravity must be negative (downward)");
        }
        if !(0.0..=1.0).contains(&self.air_control) {
            return Err("Air control must be within [0, 1]");
        }
        if self.ground_radius < 0.0 || self.skin_width < 0.0 {
            return Err("Ground radius and skin width must be non-negative");
        }
        Ok(())
    }
}

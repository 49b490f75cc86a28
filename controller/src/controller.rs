use crate::{
    config::{AxisLock, ControllerConfig},
    facing::{look_along_planar, turn_towards},
    gizmo::rail_segment,
    ground::GroundCheck,
    host::{CharacterMover, GroundProbe},
    motion::{
        compose_velocity, horizontal_velocity, integrate_gravity, jump_launch_speed,
        planar_direction, settle_on_ground,
    },
    types::{CapsuleSpec, InputSnapshot, Pose, Vec3},
};

/// Output of a single [`RailController::update`] tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Result of this frame's ground query.
    pub grounded: bool,
    /// Whether a jump was launched this frame.
    pub jumped: bool,
    /// Vertical speed after the ground settle and jump launch, before gravity.
    pub vertical_before_gravity: f32,
    /// Full velocity submitted for this frame (m/s).
    pub velocity: Vec3,
    /// Displacement requested from the mover (`velocity * dt`).
    pub requested: Vec3,
    /// Displacement the mover reported as applied.
    pub applied: Vec3,
}

/// 2.5D character controller constrained to a rail (LockX) or a side-scrolling
/// plane (LockZ).
///
/// Owns its config and per-frame state. The pose, collision sweep and overlap
/// query belong to the host and are passed into [`Self::update`].
#[derive(Clone, Debug)]
pub struct RailController {
    config: ControllerConfig,
    ground_check: GroundCheck,
    lock_value: f32,
    vertical_velocity: f32,
    is_grounded: bool,
}

impl RailController {
    /// Create the controller at spawn.
    ///
    /// An unset `lock_value` is taken from `spawn` along the locked axis.
    pub fn new(config: ControllerConfig, capsule: CapsuleSpec, spawn: &Pose) -> Self {
        let lock_value = config
            .lock_value
            .unwrap_or_else(|| config.lock_axis.locked_coord(&spawn.translation));
        let ground_check = GroundCheck::from_config(&config, capsule);

        log::debug!(
            "rail controller spawned: axis={:?} lock_value={} anchor={:?}",
            config.lock_axis,
            lock_value,
            ground_check.anchor_offset
        );

        Self {
            config,
            ground_check,
            lock_value,
            vertical_velocity: 0.0,
            is_grounded: false,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn lock_axis(&self) -> AxisLock {
        self.config.lock_axis
    }

    pub fn lock_value(&self) -> f32 {
        self.lock_value
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn ground_check(&self) -> &GroundCheck {
        &self.ground_check
    }

    /// Center and radius of the ground sphere at `pose`, for debug drawing.
    pub fn ground_sphere(&self, pose: &Pose) -> (Vec3, f32) {
        (self.ground_check.anchor(pose), self.ground_check.radius)
    }

    /// Rail/plane line through `pose`'s height, for debug drawing.
    pub fn rail_segment(&self, pose: &Pose) -> (Vec3, Vec3) {
        rail_segment(self.config.lock_axis, self.lock_value, pose.translation.y)
    }

    /// Run one simulation frame.
    ///
    /// Order matters and is fixed:
    /// 1. Ground query; a grounded, falling character is pressed down.
    /// 2. Planar direction from the single active input axis.
    /// 3. Horizontal velocity with air control.
    /// 4. Jump launch, then gravity (gravity applies on the launch frame too).
    /// 5. Move through the host, then pin the locked axis.
    /// 6. Optional facing toward horizontal motion.
    pub fn update<M, G>(
        &mut self,
        dt: f32,
        input: InputSnapshot,
        pose: &mut Pose,
        mover: &mut M,
        ground: &G,
    ) -> StepReport
    where
        M: CharacterMover + ?Sized,
        G: GroundProbe + ?Sized,
    {
        let cfg = &self.config;
        let input = input.clamped();

        // 1) Grounded state, recomputed before any use this frame.
        let was_grounded = self.is_grounded;
        let grounded = self.ground_check.is_grounded(ground, pose);
        self.is_grounded = grounded;
        self.vertical_velocity = settle_on_ground(self.vertical_velocity, grounded);
        if grounded != was_grounded {
            log::debug!(
                "grounded {} -> {} at {:?}",
                was_grounded,
                grounded,
                pose.translation
            );
        }

        // 2-3) Single-axis planar intent.
        let direction = planar_direction(cfg.lock_axis, &input);
        let horizontal = horizontal_velocity(direction, cfg.move_speed, grounded, cfg.air_control);

        // 4) Jump, then gravity.
        let jumped = grounded && input.jump_pressed;
        if jumped {
            self.vertical_velocity = jump_launch_speed(cfg.jump_height, cfg.gravity);
            log::debug!("jump launched at {} m/s", self.vertical_velocity);
        }
        let vertical_before_gravity = self.vertical_velocity;
        self.vertical_velocity = integrate_gravity(self.vertical_velocity, cfg.gravity, dt);

        // 5) Move, then pin to the rail/plane regardless of what collision did.
        let velocity = compose_velocity(horizontal, self.vertical_velocity);
        let requested = velocity * dt;
        let applied = mover.move_character(pose, requested);
        pose.translation += applied;
        cfg.lock_axis.pin(&mut pose.translation, self.lock_value);

        // 6) Cosmetic facing.
        if cfg.face_along_movement {
            if let Some(target) = look_along_planar(horizontal) {
                pose.rotation = turn_towards(pose.rotation, target, cfg.rotation_smoothing, dt);
            }
        }

        log::trace!(
            "rail step: grounded={} vv={} requested={:?} applied={:?}",
            self.is_grounded,
            self.vertical_velocity,
            requested,
            applied
        );

        StepReport {
            grounded: self.is_grounded,
            jumped,
            vertical_before_gravity,
            velocity,
            requested,
            applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{host::FreeSpaceMover, layers::LayerMask, types::Quat};

    const EPS: f32 = 1.0e-5;

    /// Ground probe with a fixed answer.
    struct FixedGround(bool);

    impl GroundProbe for FixedGround {
        fn overlap_sphere(&self, _center: Vec3, _radius: f32, _mask: LayerMask) -> bool {
            self.0
        }
    }

    /// Infinite floor at `y = height`: grounded when the sphere reaches it.
    struct Floor {
        height: f32,
    }

    impl GroundProbe for Floor {
        fn overlap_sphere(&self, center: Vec3, radius: f32, _mask: LayerMask) -> bool {
            center.y - radius <= self.height
        }
    }

    /// Mover that never lets the capsule bottom sink below `floor`, and adds
    /// `drift` to mimic collision resolution pushing the character off its plane.
    struct FloorMover {
        floor: f32,
        half_extent: f32,
        drift: Vec3,
        calls: u32,
    }

    impl FloorMover {
        fn new(drift: Vec3) -> Self {
            Self {
                floor: 0.0,
                half_extent: 1.0,
                drift,
                calls: 0,
            }
        }
    }

    impl CharacterMover for FloorMover {
        fn move_character(&mut self, pose: &Pose, displacement: Vec3) -> Vec3 {
            self.calls += 1;
            let mut applied = displacement;
            let bottom = pose.translation.y + displacement.y - self.half_extent;
            if bottom < self.floor {
                applied.y = self.floor + self.half_extent - pose.translation.y;
            }
            applied + self.drift
        }
    }

    fn capsule() -> CapsuleSpec {
        CapsuleSpec::new(0.5, 0.5)
    }

    /// One frame in free space with a fixed ground answer.
    fn step(
        ctrl: &mut RailController,
        pose: &mut Pose,
        dt: f32,
        input: InputSnapshot,
        grounded: bool,
    ) -> StepReport {
        let mut mover = FreeSpaceMover;
        let ground = FixedGround(grounded);
        ctrl.update(dt, input, pose, &mut mover, &ground)
    }

    #[test]
    fn unset_lock_value_comes_from_spawn() {
        let spawn = Pose::from_translation(Vec3::new(1.0, 2.0, 3.5));
        let z = RailController::new(ControllerConfig::default(), capsule(), &spawn);
        assert_eq!(z.lock_value(), 3.5);

        let x = RailController::new(
            ControllerConfig::default().with_lock_axis(AxisLock::LockX),
            capsule(),
            &spawn,
        );
        assert_eq!(x.lock_value(), 1.0);
        assert_eq!(x.lock_axis(), AxisLock::LockX);
        assert_eq!(x.config().lock_value, None);
    }

    #[test]
    fn explicit_zero_lock_value_is_honored() {
        let spawn = Pose::from_translation(Vec3::new(0.0, 1.0, 7.0));
        let mut ctrl = RailController::new(
            ControllerConfig::default().with_lock_value(0.0),
            capsule(),
            &spawn,
        );
        assert_eq!(ctrl.lock_value(), 0.0);

        let mut pose = spawn;
        step(&mut ctrl, &mut pose, 0.02, InputSnapshot::default(), true);
        assert_eq!(pose.translation.z, 0.0);
    }

    #[test]
    fn ground_check_anchor_is_derived_from_capsule() {
        let pose = Pose::from_translation(Vec3::new(0.0, 5.0, 0.0));
        let ctrl = RailController::new(ControllerConfig::default(), capsule(), &pose);

        // Height 2: half down, plus the 0.08 skin and 0.05 clearance.
        let check = ctrl.ground_check();
        assert!((check.anchor_offset.y - (-0.87)).abs() < EPS);
        assert_eq!(check.radius, ctrl.config().ground_radius);

        let (center, radius) = ctrl.ground_sphere(&pose);
        assert!((center.y - 4.13).abs() < EPS);
        assert_eq!(radius, check.radius);
    }

    #[test]
    fn grounded_walk_scenario() {
        // move_speed=6, grounded, horizontal=1, dt=0.1.
        let mut pose = Pose::default();
        let mut ctrl = RailController::new(ControllerConfig::default(), capsule(), &pose);

        let input = InputSnapshot::new(1.0, 0.0, false);
        let report = step(&mut ctrl, &mut pose, 0.1, input, true);

        assert!(report.grounded);
        assert!((report.velocity.x - 6.0).abs() < EPS);
        assert_eq!(report.velocity.z, 0.0);
        // vertical starts at 0 (not negative) so no settle: 0 + -25*0.1.
        assert!((report.velocity.y - (-2.5)).abs() < EPS);
        assert!((report.requested - Vec3::new(0.6, -0.25, 0.0)).norm() < EPS);
        assert!((pose.translation.x - 0.6).abs() < EPS);
    }

    #[test]
    fn jump_scenario_launches_then_integrates() {
        // jump_height=2, gravity=-25 → launch 10, after dt=0.02 → 9.5.
        let mut pose = Pose::default();
        let config = ControllerConfig::default().with_jump(2.0, -25.0);
        let mut ctrl = RailController::new(config, capsule(), &pose);

        let input = InputSnapshot::new(0.0, 0.0, true);
        let report = step(&mut ctrl, &mut pose, 0.02, input, true);

        assert!(report.jumped);
        assert!((report.vertical_before_gravity - 10.0).abs() < EPS);
        assert!((ctrl.vertical_velocity() - 9.5).abs() < EPS);
    }

    #[test]
    fn jump_needs_ground() {
        let mut pose = Pose::default();
        let mut ctrl = RailController::new(ControllerConfig::default(), capsule(), &pose);

        let input = InputSnapshot::new(0.0, 0.0, true);
        let report = step(&mut ctrl, &mut pose, 0.02, input, false);

        assert!(!report.jumped);
        assert!((ctrl.vertical_velocity() - (-0.5)).abs() < EPS);
    }

    #[test]
    fn grounded_fall_is_clamped_before_gravity() {
        let mut pose = Pose::default();
        let mut ctrl = RailController::new(ControllerConfig::default(), capsule(), &pose);

        // Fall for a while in the air.
        for _ in 0..10 {
            step(&mut ctrl, &mut pose, 0.05, InputSnapshot::default(), false);
        }
        assert!(ctrl.vertical_velocity() < -2.0);

        let report = step(&mut ctrl, &mut pose, 0.05, InputSnapshot::default(), true);
        assert_eq!(report.vertical_before_gravity, -2.0);
        assert!(ctrl.is_grounded());
    }

    #[test]
    fn airborne_speed_is_scaled_by_air_control() {
        let mut pose = Pose::default();
        let mut ground_ctrl = RailController::new(ControllerConfig::default(), capsule(), &pose);
        let mut air_ctrl = ground_ctrl.clone();
        let input = InputSnapshot::new(-1.0, 0.0, false);

        let on_ground = step(&mut ground_ctrl, &mut pose, 0.02, input, true);
        let in_air = step(&mut air_ctrl, &mut pose, 0.02, input, false);

        assert!((in_air.velocity.x - on_ground.velocity.x * 0.6).abs() < EPS);
    }

    #[test]
    fn lock_z_ignores_vertical_input_for_motion_and_facing() {
        let spawn = Pose::from_translation(Vec3::new(0.0, 1.0, 2.0));
        let base = RailController::new(ControllerConfig::default(), capsule(), &spawn);

        let mut a_ctrl = base.clone();
        let mut b_ctrl = base;
        let mut a_pose = spawn;
        let mut b_pose = spawn;

        for _ in 0..5 {
            let plain = InputSnapshot::new(1.0, 0.0, false);
            let with_vertical = InputSnapshot::new(1.0, -1.0, false);
            step(&mut a_ctrl, &mut a_pose, 0.02, plain, true);
            step(&mut b_ctrl, &mut b_pose, 0.02, with_vertical, true);
        }

        assert_eq!(a_pose, b_pose);
    }

    #[test]
    fn vertical_only_input_in_lock_z_leaves_facing_alone() {
        let mut pose = Pose::default();
        let mut ctrl = RailController::new(ControllerConfig::default(), capsule(), &pose);

        let input = InputSnapshot::new(0.0, 1.0, false);
        step(&mut ctrl, &mut pose, 0.02, input, true);

        assert_eq!(pose.rotation, Quat::identity());
        assert_eq!(pose.translation.x, 0.0);
    }

    #[test]
    fn non_finite_input_leaves_pose_finite() {
        let mut pose = Pose::default();
        let mut ctrl = RailController::new(ControllerConfig::default(), capsule(), &pose);

        let input = InputSnapshot::new(f32::NAN, 0.0, false);
        let report = step(&mut ctrl, &mut pose, 0.02, input, true);
        assert_eq!(report.velocity.x, 0.0);
        assert!(pose.translation.iter().all(|v| v.is_finite()));
        assert!(pose.rotation.coords.iter().all(|v| v.is_finite()));

        // Later frames still move and turn normally.
        let input = InputSnapshot::new(1.0, 0.0, false);
        for _ in 0..10 {
            step(&mut ctrl, &mut pose, 0.02, input, true);
        }
        assert!(pose.translation.x > 0.0);
        assert!(pose.rotation.coords.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn lock_x_moves_along_z_only() {
        let spawn = Pose::from_translation(Vec3::new(4.0, 0.0, 0.0));
        let mut pose = spawn;
        let mut ctrl = RailController::new(
            ControllerConfig::default().with_lock_axis(AxisLock::LockX),
            capsule(),
            &spawn,
        );

        let input = InputSnapshot::new(1.0, 1.0, false);
        let report = step(&mut ctrl, &mut pose, 0.1, input, true);

        assert_eq!(report.velocity.x, 0.0);
        assert!((report.velocity.z - 6.0).abs() < EPS);
        assert_eq!(pose.translation.x, 4.0);
    }

    #[test]
    fn lock_z_plane_is_pinned_despite_collision_drift() {
        let spawn = Pose::from_translation(Vec3::new(0.0, 1.0, 3.0));
        let mut pose = spawn;
        let mut ctrl = RailController::new(ControllerConfig::default(), capsule(), &spawn);
        let mut mover = FloorMover::new(Vec3::new(0.0, 0.0, 0.37));
        let floor = Floor { height: 0.0 };

        for i in 0..50 {
            let horizontal = if i % 2 == 0 { 1.0 } else { -1.0 };
            let input = InputSnapshot::new(horizontal, 0.5, i == 10);
            ctrl.update(1.0 / 60.0, input, &mut pose, &mut mover, &floor);
            assert_eq!(pose.translation.z, 3.0);
        }
        assert_eq!(mover.calls, 50);
    }

    #[test]
    fn lock_x_rail_is_pinned_despite_collision_drift() {
        let spawn = Pose::from_translation(Vec3::new(-2.5, 1.0, 0.0));
        let mut pose = spawn;
        let mut ctrl = RailController::new(
            ControllerConfig::default().with_lock_axis(AxisLock::LockX),
            capsule(),
            &spawn,
        );
        let mut mover = FloorMover::new(Vec3::new(0.41, 0.0, 0.0));
        let floor = Floor { height: 0.0 };

        for i in 0..50 {
            let vertical = if i < 25 { 1.0 } else { -1.0 };
            let input = InputSnapshot::new(0.5, vertical, i == 10);
            ctrl.update(1.0 / 60.0, input, &mut pose, &mut mover, &floor);
            assert_eq!(pose.translation.x, -2.5);
        }
        assert_eq!(mover.calls, 50);
        assert!(pose.translation.z != 0.0);
    }

    #[test]
    fn resting_on_ground_does_not_drift() {
        let spawn = Pose::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let mut pose = spawn;
        let mut ctrl = RailController::new(ControllerConfig::default(), capsule(), &spawn);
        let mut mover = FloorMover::new(Vec3::zeros());
        let floor = Floor { height: 0.0 };
        let dt = 1.0 / 60.0;

        for _ in 0..120 {
            let report = ctrl.update(dt, InputSnapshot::default(), &mut pose, &mut mover, &floor);
            assert!(report.grounded);
        }

        // Each frame re-enters grounded and falling, so the settle value is restored.
        let report = ctrl.update(dt, InputSnapshot::default(), &mut pose, &mut mover, &floor);
        assert_eq!(report.vertical_before_gravity, -2.0);
        assert_eq!(pose.translation.z, 0.0);
        assert!((pose.translation.y - 1.0).abs() < EPS);
    }

    #[test]
    fn facing_turns_toward_motion() {
        let mut pose = Pose::default();
        let mut ctrl = RailController::new(ControllerConfig::default(), capsule(), &pose);
        let target = look_along_planar(Vec3::x()).unwrap();
        let input = InputSnapshot::new(1.0, 0.0, false);

        let before = pose.rotation.angle_to(&target);
        step(&mut ctrl, &mut pose, 0.02, input, true);
        let after = pose.rotation.angle_to(&target);
        assert!(after < before);

        for _ in 0..200 {
            step(&mut ctrl, &mut pose, 0.02, input, true);
        }
        assert!(pose.rotation.angle_to(&target) < 1.0e-3);
    }

    #[test]
    fn facing_disabled_keeps_rotation() {
        let mut pose = Pose::default();
        let mut ctrl = RailController::new(
            ControllerConfig::default().with_face_along_movement(false),
            capsule(),
            &pose,
        );

        let input = InputSnapshot::new(1.0, 0.0, false);
        step(&mut ctrl, &mut pose, 0.02, input, true);
        assert_eq!(pose.rotation, Quat::identity());
    }

    #[test]
    fn rail_segment_follows_pose_height() {
        let spawn = Pose::from_translation(Vec3::new(0.0, 3.0, -1.0));
        let ctrl = RailController::new(ControllerConfig::default(), capsule(), &spawn);
        let (a, b) = ctrl.rail_segment(&spawn);
        assert_eq!(a.y, 3.0);
        assert_eq!(b.z, -1.0);
    }
}

//! Rapier-backed host for the rail controller.
//!
//! Builds an in-memory Rapier scene from static level colliders and exposes it
//! through the controller's host traits:
//! - [`RapierMover`] wraps Rapier's `KinematicCharacterController` sweep.
//! - [`RapierGroundProbe`] answers sphere overlaps with a layer mask, ignoring triggers.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: no dynamics are stepped, only scene queries and the KCC.
//! - Immutable level: colliders do not move after construction.

// Re-export Rapier so hosts can use Rapier macros/types without depending on it directly.
pub use rapier3d;

use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::na::{Translation3, UnitQuaternion};
use rapier3d::prelude::*;

use crate::{
    host::{CharacterMover, GroundProbe},
    layers::LayerMask,
    types::{CapsuleSpec, Pose, Vec3},
};

/// Definition of an immutable level collider.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
/// - `layers` are the collision layers this collider belongs to (ground mask bits).
#[derive(Clone, Debug)]
pub struct StaticColliderDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
    pub layers: LayerMask,
    /// Triggers never block movement and never count as ground.
    pub is_trigger: bool,
}

impl StaticColliderDef {
    pub fn new(id: u32, translation: Vector<f32>, shape: ColliderShapeDef) -> Self {
        Self {
            id,
            translation,
            rotation: UnitQuaternion::identity(),
            shape,
            layers: LayerMask::all(),
            is_trigger: false,
        }
    }

    pub fn with_rotation(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    fn is_finite(&self) -> bool {
        let shape_ok = match &self.shape {
            ColliderShapeDef::Plane {
                offset_along_normal,
            } => offset_along_normal.is_finite(),
            ColliderShapeDef::Cuboid { half_extents } => half_extents.iter().all(|v| v.is_finite()),
            ColliderShapeDef::Sphere { radius } => radius.is_finite(),
            ColliderShapeDef::CapsuleY {
                radius,
                half_height,
            } => radius.is_finite() && half_height.is_finite(),
        };
        shape_ok
            && self.translation.iter().all(|v| v.is_finite())
            && self.rotation.coords.iter().all(|v| v.is_finite())
    }
}

/// Supported level collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space) with normal `rotation * +Y`, shifted along
    /// that normal by `offset_along_normal`.
    Plane { offset_along_normal: f32 },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },
}

/// In-memory Rapier structures needed for scene queries and the KCC.
///
/// Build once when the level loads and reuse every frame.
pub struct LevelGeometry {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
}

impl LevelGeometry {
    /// Build level geometry from static collider definitions.
    ///
    /// - The input is sorted by `id` before insertion.
    /// - Definitions with non-finite values are skipped with a warning.
    pub fn build(mut defs: Vec<StaticColliderDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.into_iter() {
            if !def.is_finite() {
                log::warn!("Skipping level collider {} with non-finite values", def.id);
                continue;
            }

            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
            let rb = RigidBodyBuilder::fixed().pose(iso).build();
            let rb_handle = bodies.insert(rb);

            let collider = collider_from_def(&def);
            colliders.insert_with_parent(collider, rb_handle, &mut bodies);
        }

        // Run collision detection once (no dynamics) so the broad-phase BVH is populated.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();
        let hooks = ();
        let events = ();
        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &hooks,
            &events,
        );

        log::info!("Level geometry built with {} colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    /// Number of colliders in the level.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Borrowed `QueryPipeline` view for scene queries and the KCC.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// Ground probe over this level.
    pub fn ground_probe(&self) -> RapierGroundProbe<'_> {
        RapierGroundProbe { level: self }
    }

    /// Mover for a capsule character over this level, for one frame of `dt_seconds`.
    pub fn mover(&self, capsule: CapsuleSpec, dt_seconds: f32) -> RapierMover<'_> {
        RapierMover::new(self, capsule, dt_seconds)
    }
}

/// Build a Rapier collider from a `StaticColliderDef`.
///
/// The pose lives on the parent rigid-body, so the collider only carries
/// shape-local offsets.
fn collider_from_def(def: &StaticColliderDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            let offset = vector![0.0, *offset_along_normal, 0.0];
            ColliderBuilder::halfspace(Vector::y_axis()).translation(offset)
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius),
    };

    builder
        .collision_groups(
            InteractionGroups::all().with_memberships(Group::from_bits_truncate(def.layers.bits)),
        )
        .sensor(def.is_trigger)
        .build()
}

/// Sphere overlap query against a [`LevelGeometry`].
#[derive(Clone, Copy)]
pub struct RapierGroundProbe<'a> {
    level: &'a LevelGeometry,
}

impl GroundProbe for RapierGroundProbe<'_> {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        if mask.is_empty() {
            return false;
        }

        let on_mask = |_: ColliderHandle, collider: &Collider| {
            mask.intersects(collider.collision_groups().memberships.bits())
        };
        let filter = QueryFilter::default().exclude_sensors().predicate(&on_mask);
        let pipeline = self.level.query_pipeline(filter);

        let ball = Ball::new(radius.max(0.0));
        let pos = Isometry::translation(center.x, center.y, center.z);
        pipeline.intersect_shape(pos, &ball).next().is_some()
    }
}

/// Collision-aware mover backed by Rapier's `KinematicCharacterController`.
pub struct RapierMover<'a> {
    level: &'a LevelGeometry,
    kcc: KinematicCharacterController,
    shape: Capsule,
    dt_seconds: f32,
    /// Whether the last sweep ended on walkable ground, as Rapier sees it.
    pub last_grounded: bool,
}

impl<'a> RapierMover<'a> {
    pub fn new(level: &'a LevelGeometry, capsule: CapsuleSpec, dt_seconds: f32) -> Self {
        let kcc = KinematicCharacterController {
            autostep: Some(CharacterAutostep {
                include_dynamic_bodies: false,
                max_height: CharacterLength::Relative(0.4),
                ..CharacterAutostep::default()
            }),
            offset: CharacterLength::Relative(0.025),
            ..KinematicCharacterController::default()
        };

        Self {
            level,
            kcc,
            shape: Capsule::new_y(capsule.half_height, capsule.radius),
            dt_seconds,
            last_grounded: false,
        }
    }

    /// Replace the Rapier controller settings (offset, slopes, autostep, snap).
    pub fn with_kcc(mut self, kcc: KinematicCharacterController) -> Self {
        self.kcc = kcc;
        self
    }
}

impl CharacterMover for RapierMover<'_> {
    fn move_character(&mut self, pose: &Pose, displacement: Vec3) -> Vec3 {
        let pipeline = self
            .level
            .query_pipeline(QueryFilter::only_fixed().exclude_sensors());

        let movement = self.kcc.move_shape(
            self.dt_seconds,
            &pipeline,
            &self.shape,
            &pose.iso(),
            displacement,
            |_| {},
        );

        self.last_grounded = movement.grounded;
        movement.translation
    }
}

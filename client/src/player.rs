use bevy::prelude::*;
use controller::{
    CapsuleSpec, ControllerConfig, Pose, RailController, constants::DEFAULT_GROUND_RADIUS,
};
use leafwing_input_manager::prelude::ActionState;
use nalgebra as na;

use crate::{
    input::{RailAction, snapshot},
    level::{LevelCollision, walkable_layers},
};

/// Player collision capsule (meters).
pub const PLAYER_CAPSULE: CapsuleSpec = CapsuleSpec::new(0.4, 0.5);

const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 3.0, 0.0);

#[derive(Component)]
pub struct Player;

/// A character driven by the rail controller.
#[derive(Component)]
pub struct RailCharacter {
    pub controller: RailController,
    pub capsule: CapsuleSpec,
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_player);
    app.add_systems(Update, drive_rail_characters);
}

fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = ControllerConfig::default()
        .with_ground_check(DEFAULT_GROUND_RADIUS, walkable_layers());
    if let Err(err) = config.validate() {
        warn!("Player controller config looks wrong: {err}");
    }

    let transform = Transform::from_translation(PLAYER_SPAWN);
    let controller = RailController::new(config, PLAYER_CAPSULE, &to_pose(&transform));

    commands
        .spawn((
            Player,
            RailCharacter {
                controller,
                capsule: PLAYER_CAPSULE,
            },
            Mesh3d(meshes.add(Mesh::from(Capsule3d {
                radius: PLAYER_CAPSULE.radius,
                half_length: PLAYER_CAPSULE.half_height,
            }))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::linear_rgb(0.2, 0.9, 0.8),
                ..default()
            })),
            transform,
        ))
        .with_children(|parent| {
            // Nose: the controller faces local +Z along movement.
            parent.spawn((
                Mesh3d(meshes.add(Mesh::from(Sphere { radius: 0.12 }))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(1.0, 1.0, 1.0),
                    ..default()
                })),
                Transform::from_xyz(0.0, 0.4, PLAYER_CAPSULE.radius),
            ));
        });
}

fn drive_rail_characters(
    time: Res<Time>,
    actions: Res<ActionState<RailAction>>,
    level: Res<LevelCollision>,
    mut query: Query<(&mut Transform, &mut RailCharacter), With<Player>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    let input = snapshot(&actions);
    let probe = level.geometry.ground_probe();

    for (mut transform, mut character) in query.iter_mut() {
        let mut pose = to_pose(&transform);
        let mut mover = level.geometry.mover(character.capsule, dt);

        let report = character
            .controller
            .update(dt, input, &mut pose, &mut mover, &probe);

        apply_pose(&pose, &mut transform);

        if report.jumped {
            debug!("player jumped from {:?}", transform.translation);
        }
    }
}

/// Bevy transform → controller pose (scale is ignored).
pub fn to_pose(transform: &Transform) -> Pose {
    let t = transform.translation;
    let q = transform.rotation;
    Pose::new(
        na::Vector3::new(t.x, t.y, t.z),
        na::UnitQuaternion::new_normalize(na::Quaternion::new(q.w, q.x, q.y, q.z)),
    )
}

/// Write a controller pose back onto a Bevy transform.
pub fn apply_pose(pose: &Pose, transform: &mut Transform) {
    transform.translation = to_bevy(pose.translation);
    let q = pose.rotation.coords;
    transform.rotation = Quat::from_xyzw(q.x, q.y, q.z, q.w);
}

pub fn to_bevy(v: na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

use bevy::prelude::*;
use controller::{ColliderShapeDef, LayerMask, LevelGeometry, StaticColliderDef, define_layers};
use nalgebra::vector;

define_layers!(LevelLayer, u32, {
    Ground,
    Platform,
    Trigger,
});

/// Layers the player treats as ground.
pub fn walkable_layers() -> LayerMask {
    LayerMask::from_layers(&[LevelLayer::Ground, LevelLayer::Platform])
}

/// Static collision world shared by every character controller in the level.
#[derive(Resource)]
pub struct LevelCollision {
    pub geometry: LevelGeometry,
}

/// Platforms along the side-scrolling plane: (center, half extents).
const PLATFORMS: [(Vec3, Vec3); 4] = [
    (Vec3::new(4.0, 0.5, 0.0), Vec3::new(1.0, 0.5, 1.0)),
    (Vec3::new(8.0, 1.25, 0.0), Vec3::new(1.5, 0.25, 1.0)),
    (Vec3::new(13.0, 2.25, 0.0), Vec3::new(1.5, 0.25, 1.0)),
    (Vec3::new(-6.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 1.0)),
];

/// A trigger volume the player passes through; never counts as ground.
const TRIGGER: (Vec3, Vec3) = (Vec3::new(18.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0));

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut defs = vec![
        StaticColliderDef::new(
            0,
            vector![0.0, 0.0, 0.0],
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        )
        .with_layers(LayerMask::none().with(LevelLayer::Ground)),
    ];

    commands.spawn((
        Transform::from_xyz(0., 0., 0.),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(80., 20.).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));

    let platform_material = materials.add(Color::srgb_u8(124, 144, 255));
    for (i, (center, half)) in PLATFORMS.iter().enumerate() {
        defs.push(
            StaticColliderDef::new(
                1 + i as u32,
                vector![center.x, center.y, center.z],
                ColliderShapeDef::Cuboid {
                    half_extents: vector![half.x, half.y, half.z],
                },
            )
            .with_layers(LayerMask::none().with(LevelLayer::Platform)),
        );

        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(half.x * 2.0, half.y * 2.0, half.z * 2.0))),
            MeshMaterial3d(platform_material.clone()),
            Transform::from_translation(*center),
        ));
    }

    let (center, half) = TRIGGER;
    defs.push(
        StaticColliderDef::new(
            100,
            vector![center.x, center.y, center.z],
            ColliderShapeDef::Cuboid {
                half_extents: vector![half.x, half.y, half.z],
            },
        )
        .with_layers(LayerMask::none().with(LevelLayer::Trigger))
        .as_trigger(),
    );
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(half.x * 2.0, half.y * 2.0, half.z * 2.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.6, 0.1, 0.35),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_translation(center),
    ));

    // light
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            range: 60.0,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, -6.0),
    ));

    commands.insert_resource(LevelCollision {
        geometry: LevelGeometry::build(defs),
    });
    info!("Level setup");
}

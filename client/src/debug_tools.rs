//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (`#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

use crate::player::{RailCharacter, to_bevy, to_pose};

const RAIL_COLOR: Color = Color::srgb(0.0, 1.0, 1.0);
const GROUND_SPHERE_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, draw_rail_gizmos);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

/// Rail/plane line and ground-check sphere for every rail character.
fn draw_rail_gizmos(mut gizmos: Gizmos, characters: Query<(&Transform, &RailCharacter)>) {
    for (transform, character) in characters.iter() {
        let pose = to_pose(transform);

        let (start, end) = character.controller.rail_segment(&pose);
        gizmos.line(to_bevy(start), to_bevy(end), RAIL_COLOR);

        let (center, radius) = character.controller.ground_sphere(&pose);
        gizmos.sphere(
            Isometry3d::from_translation(to_bevy(center)),
            radius,
            GROUND_SPHERE_COLOR,
        );
    }
}

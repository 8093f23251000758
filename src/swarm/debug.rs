use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::manager::{SwarmManager, TokenTask};

/// F3 toggles the hit-box overlay.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct SwarmDebug(pub bool);

pub fn toggle_swarm_debug(keys: Res<ButtonInput<KeyCode>>, mut debug: ResMut<SwarmDebug>) {
    if keys.just_pressed(KeyCode::F3) {
        debug.0 = !debug.0;
    }
}

/// Outline the container and every token's hit box, coloured by task state.
pub fn draw_swarm_gizmos(
    mut gizmos: Gizmos,
    debug: Res<SwarmDebug>,
    windows: Query<&Window, With<PrimaryWindow>>,
    manager: Res<SwarmManager>,
) {
    if !debug.0 {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let extents = window.size();
    gizmos.rect_2d(Vec2::ZERO, extents - Vec2::splat(2.0), Color::srgba(1.0, 1.0, 1.0, 0.3));

    for slot in manager.slots() {
        let color = match slot.task {
            TokenTask::Pending { .. } => Color::srgb(0.5, 0.5, 0.5),
            TokenTask::Running if slot.token.paused => Color::srgb(1.0, 0.0, 0.0),
            TokenTask::Running => Color::srgb(0.0, 0.68, 0.71),
            TokenTask::Stopped => Color::srgb(0.2, 0.2, 0.2),
        };
        let center = slot.token.to_transform(extents).translation.truncate();
        gizmos.rect_2d(center, Vec2::splat(slot.token.size), color);
    }
}

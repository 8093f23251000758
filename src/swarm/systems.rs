use bevy::asset::LoadState;
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tracing::{debug, info};

use super::manager::{BuildContext, SwarmManager, SwarmRoot, ToolIcon};
use super::tools::ToolCatalog;
use super::viewport::ViewportWatcher;

pub fn spawn_camera(mut commands: Commands, catalog: Res<ToolCatalog>) {
    commands.spawn(Camera2d);
    info!(tools = catalog.tools().len(), "tool swarm ready");
}

/// Container size, or None if the window is gone.
fn container_size(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<Vec2> {
    windows.single().ok().map(|w| w.size())
}

/// Width of the page viewport. On the web the primary window is the tools
/// canvas, so the browser window is asked instead.
#[cfg(target_arch = "wasm32")]
fn viewport_width(window: &Window) -> f32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .map_or(window.width(), |w| w as f32)
}

#[cfg(not(target_arch = "wasm32"))]
fn viewport_width(window: &Window) -> f32 {
    window.width()
}

/// Build once the first window size has settled, then rebuild after the
/// viewport settles from a resize or orientation flip.
pub fn rebuild_on_viewport_change(
    mut commands: Commands,
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    catalog: Res<ToolCatalog>,
    asset_server: Res<AssetServer>,
    mut watcher: ResMut<ViewportWatcher>,
    mut manager: ResMut<SwarmManager>,
) {
    let container = container_size(&windows);
    if !watcher.observe(container, time.elapsed_secs()) {
        return;
    }

    let ctx = BuildContext {
        container,
        viewport_width: windows.single().map_or(0.0, viewport_width),
        now: time.elapsed_secs(),
    };
    let built = manager.build(
        &mut commands,
        ctx,
        catalog.tools(),
        |tool| asset_server.load(tool.icon_path()),
        rand::random::<f32>,
    );
    match built {
        Ok(handle) => info!(
            generation = handle.generation,
            tokens = handle.tokens,
            "tool swarm rebuilt"
        ),
        Err(err) => debug!(%err, "skipped tool swarm build"),
    }
}

/// Pointer-enter/leave and touch start/end, as the set of active points.
pub fn track_pointers(
    windows: Query<&Window, With<PrimaryWindow>>,
    touches: Res<Touches>,
    mut manager: ResMut<SwarmManager>,
) {
    let mut points: Vec<Vec2> = touches.iter().map(|t| t.position()).collect();
    if let Some(cursor) = windows.single().ok().and_then(|w| w.cursor_position()) {
        points.push(cursor);
    }
    manager.update_pointers(&points);
}

/// One simulation step per rendered frame (deliberately not FixedUpdate).
pub fn step_swarm(
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    roots: Query<(), With<SwarmRoot>>,
    mut manager: ResMut<SwarmManager>,
) {
    let Some(handle) = manager.handle() else {
        return;
    };
    // Detached: window gone, or the root was despawned behind our back.
    let container = container_size(&windows).filter(|_| roots.contains(handle.root));
    manager.tick(time.elapsed_secs(), container);
}

/// Hide the sprite and reveal the letter label of every icon that failed to load.
pub fn apply_icon_fallbacks(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut manager: ResMut<SwarmManager>,
) {
    let failed: Vec<usize> = manager
        .slots()
        .iter()
        .enumerate()
        .filter(|(_, slot)| !slot.fallback_shown)
        .filter(|(_, slot)| {
            matches!(
                asset_server.get_load_state(slot.icon.id()),
                Some(LoadState::Failed(_))
            )
        })
        .map(|(index, _)| index)
        .collect();

    if !failed.is_empty() {
        manager.show_fallbacks(&mut commands, &failed);
    }
}

/// Write token state onto node transforms. State is never read back.
pub fn project_tokens(
    windows: Query<&Window, With<PrimaryWindow>>,
    manager: Res<SwarmManager>,
    mut nodes: Query<&mut Transform, With<ToolIcon>>,
) {
    let Some(extents) = container_size(&windows) else {
        return;
    };
    for slot in manager.slots() {
        if let Ok(mut tf) = nodes.get_mut(slot.node) {
            *tf = slot.token.to_transform(extents);
        }
    }
}

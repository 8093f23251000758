use bevy::prelude::*;
use tracing::warn;

pub mod debug;
pub mod manager;
pub mod systems;
pub mod token;
pub mod tools;
pub mod viewport;

pub use manager::{BuildContext, SwarmError, SwarmHandle, SwarmManager, TokenTask};
pub use token::ToolToken;
pub use tools::{CatalogError, ToolCatalog, ToolDescriptor};
pub use viewport::{ViewportClass, ViewportWatcher};

/// Plug this into your App with `.add_plugins(SwarmPlugin)`.
pub struct SwarmPlugin;

impl Plugin for SwarmPlugin {
    fn build(&self, app: &mut App) {
        let catalog = ToolCatalog::embedded().unwrap_or_else(|err| {
            warn!(%err, "tool catalog unusable, the swarm will be empty");
            ToolCatalog::default()
        });

        app.insert_resource(catalog)
            .init_resource::<SwarmManager>()
            .init_resource::<ViewportWatcher>()
            .init_resource::<debug::SwarmDebug>()
            .add_systems(Startup, systems::spawn_camera)
            // Per rendered frame, in this order: rebuild, input, step, fallbacks, render.
            .add_systems(
                Update,
                (
                    systems::rebuild_on_viewport_change,
                    systems::track_pointers,
                    systems::step_swarm,
                    systems::apply_icon_fallbacks,
                    systems::project_tokens,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (debug::toggle_swarm_debug, debug::draw_swarm_gizmos).chain(),
            );
    }
}

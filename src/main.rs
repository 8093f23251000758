use bevy::prelude::*;

use tool_swarm::config::{BACKGROUND, CONTAINER_CANVAS};
use tool_swarm::swarm::SwarmPlugin;

fn main() {
    App::new()
        .insert_resource(ClearColor(BACKGROUND))
        // On the web the window binds to the page's tools container canvas
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tool swarm".into(),
                canvas: Some(CONTAINER_CANVAS.into()),
                fit_canvas_to_parent: true,
                prevent_default_event_handling: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(SwarmPlugin)
        .run();
}

use bevy::prelude::*;

use crate::ecs::core::SimulationSet;
use crate::ecs::plugins::presentation::systems::build_render_keys_system;

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            build_render_keys_system.in_set(SimulationSet::Publish),
        );
    }
}

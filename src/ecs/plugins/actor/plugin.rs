use bevy::prelude::*;

use crate::ecs::core::SimulationSet;
use crate::ecs::plugins::actor::components::*;
use crate::ecs::plugins::actor::systems::*;
use crate::ecs::plugins::network::components::{NetworkEntityMap, NetworkIdAllocator};

/// Actor lifecycle and locomotion input.
pub struct ActorPlugin;

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ActorSpawnEvent>()
            .add_event::<ActorDespawnEvent>()
            .add_event::<LocomotionEvent>()
            .init_resource::<NetworkIdAllocator>()
            .init_resource::<NetworkEntityMap>()
            .add_systems(
                FixedUpdate,
                (actor_despawn_system, actor_spawn_system, locomotion_system)
                    .chain()
                    .in_set(SimulationSet::Ingest),
            );
    }
}

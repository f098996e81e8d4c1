use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

use crate::ecs::core::CorePlugin;

pub mod actor;
pub mod network;
pub mod physics;
pub mod prefab;
pub mod presentation;
pub mod sync;

pub use actor::ActorPlugin;
pub use network::ReplicationPlugin;
pub use physics::PhysicsPlugin;
pub use prefab::PrefabPlugin;
pub use presentation::PresentationPlugin;
pub use sync::SyncPlugin;

/// The simulation without replication. Insert [`SimulationConfig`] and
/// [`PrefabManifest`] before adding the group to override the defaults.
///
/// [`SimulationConfig`]: crate::ecs::core::SimulationConfig
/// [`PrefabManifest`]: crate::ecs::plugins::prefab::PrefabManifest
pub struct SimulationPlugins;

impl PluginGroup for SimulationPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(CorePlugin)
            .add(PrefabPlugin)
            .add(ActorPlugin)
            .add(SyncPlugin)
            .add(PhysicsPlugin)
            .add(PresentationPlugin)
    }
}

use bevy::prelude::*;

use crate::ecs::plugins::prefab::components::PrefabTable;
use crate::ecs::plugins::prefab::manifest::PrefabManifest;
use crate::ecs::plugins::prefab::systems::bake_prefabs_system;

/// Bakes templates from the [`PrefabManifest`] resource, or the built-in one
/// when the app did not provide its own.
pub struct PrefabPlugin;

impl Plugin for PrefabPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<PrefabManifest>() {
            app.insert_resource(PrefabManifest::builtin());
        }

        app.init_resource::<PrefabTable>()
            .add_systems(Startup, bake_prefabs_system);
    }
}

#![allow(dead_code)]

use actor_sync::ecs::core::{BodyKind, CoreState, HeadKind, SimulationConfig, TickContext};
use actor_sync::ecs::plugins::actor::{ActorBundle, Creature};
use actor_sync::ecs::plugins::network::{
    NetworkEntityMap, NetworkId, NetworkIdAllocator, ReplicationHost,
};
use actor_sync::ecs::plugins::prefab::{PrefabManifest, PrefabTable};
use actor_sync::{ReplicationPlugin, SimulationPlugins};
use bevy::prelude::*;

/// Headless app with the built-in prefabs baked.
pub fn test_app() -> App {
    app_with_manifest(PrefabManifest::builtin())
}

pub fn app_with_manifest(manifest: PrefabManifest) -> App {
    let mut app = App::new();
    app.insert_resource(manifest).add_plugins(SimulationPlugins);
    // Runs Startup, which bakes the templates.
    app.update();
    app
}

/// Headless app that also publishes and consumes replication frames.
pub fn replicated_app(config: SimulationConfig) -> (App, ReplicationHost) {
    let (replication, host) = ReplicationPlugin::new();
    let mut app = App::new();
    app.insert_resource(config)
        .add_plugins((SimulationPlugins, replication));
    app.update();
    (app, host)
}

pub fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

pub fn ticks(app: &mut App, count: usize) {
    for _ in 0..count {
        tick(app);
    }
}

pub fn partial_tick(app: &mut App) {
    app.world_mut().resource_mut::<TickContext>().is_full_tick = false;
    tick(app);
    app.world_mut().resource_mut::<TickContext>().is_full_tick = true;
}

pub fn spawn_actor(app: &mut App, core: CoreState, position: Vec3) -> Entity {
    let world = app.world_mut();
    let network_id = world
        .resource_mut::<NetworkIdAllocator>()
        .allocate()
        .expect("id space");
    let entity = world
        .spawn((ActorBundle::new(network_id, core, position), Creature))
        .id();
    world
        .resource_mut::<NetworkEntityMap>()
        .register(network_id, entity);
    entity
}

pub fn spawn_kind(app: &mut App, head: HeadKind, body: BodyKind) -> Entity {
    spawn_actor(app, CoreState::new(head, body), Vec3::ZERO)
}

pub fn core_of(app: &App, entity: Entity) -> CoreState {
    *app.world().get::<CoreState>(entity).unwrap()
}

pub fn edit_core(app: &mut App, entity: Entity, edit: impl FnOnce(&mut CoreState)) {
    let mut core = app.world_mut().get_mut::<CoreState>(entity).unwrap();
    edit(&mut core);
}

pub fn body_template(app: &App, kind: BodyKind) -> Entity {
    app.world().resource::<PrefabTable>().find_body(kind).unwrap()
}

pub fn network_id(app: &App, entity: Entity) -> NetworkId {
    *app.world().get::<NetworkId>(entity).unwrap()
}

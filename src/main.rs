/*!
# Actor Sync Server

Headless host for the actor simulation.

Runs the fixed-tick simulation with [`SimulationPlugins`] and hands every
published [`ReplicationFrame`] to a transport thread over a crossbeam channel.
The transport here only logs the JSON payload; a real deployment would put it
on the wire.

Configuration is read from the JSON file named by the first argument or by
`ACTOR_SYNC_CONFIG`. Without either, defaults are used.
*/

use bevy::log::LogPlugin;
use bevy::prelude::*;
use rand::Rng;
use std::path::PathBuf;

use actor_sync::ecs::core::{BodyKind, Flags, HeadKind, SimulationConfig};
use actor_sync::ecs::plugins::actor::ActorSpawnEvent;
use actor_sync::ecs::plugins::network::{ReplicationFrame, ReplicationHost};
use actor_sync::ecs::plugins::prefab::PrefabManifest;
use actor_sync::{ReplicationPlugin, SimulationPlugins};

const CONFIG_ENV: &str = "ACTOR_SYNC_CONFIG";
const DEMO_CREATURES: usize = 12;

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()));

    let config = load_config();
    let manifest = match &config.prefab_manifest {
        Some(path) => match PrefabManifest::load(path) {
            Ok(manifest) => manifest,
            Err(err) => {
                error!("{err}; falling back to the built-in prefabs");
                PrefabManifest::builtin()
            }
        },
        None => PrefabManifest::builtin(),
    };

    info!("Starting actor sync server at {} Hz", config.tick_hz);

    let (replication, host) = ReplicationPlugin::new();
    spawn_transport_thread(host);

    app.insert_resource(Time::<Fixed>::from_hz(config.tick_hz as f64))
        .insert_resource(config)
        .insert_resource(manifest)
        .add_plugins((SimulationPlugins, replication))
        .add_systems(Startup, spawn_demo_actors)
        .run();
}

fn load_config() -> SimulationConfig {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .map(PathBuf::from);

    let Some(path) = path else {
        return SimulationConfig::default();
    };

    match SimulationConfig::load(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            error!("{err}; using defaults");
            SimulationConfig::default()
        }
    }
}

/// Consumes published frames off the simulation thread.
fn spawn_transport_thread(host: ReplicationHost) {
    std::thread::spawn(move || {
        for frame in host.frames.iter() {
            log_frame(&frame);
        }
        info!("Replication channel closed");
    });
}

fn log_frame(frame: &ReplicationFrame) {
    match serde_json::to_string(frame) {
        Ok(json) => debug!("tick {} {:?}: {}", frame.tick, frame.kind, json),
        Err(err) => warn!("Could not encode frame for tick {}: {err}", frame.tick),
    }
}

/// Populates the world with one player and a handful of creatures.
fn spawn_demo_actors(mut spawns: EventWriter<ActorSpawnEvent>) {
    let mut rng = rand::thread_rng();

    spawns.send(ActorSpawnEvent::character(1, Vec3::ZERO));

    let kinds = [
        (HeadKind::Goblin, BodyKind::Goblin),
        (HeadKind::Slime, BodyKind::Slime),
        (HeadKind::Skeleton, BodyKind::Skeleton),
        (HeadKind::Bat, BodyKind::Bat),
        (HeadKind::Golem, BodyKind::Golem),
    ];

    for _ in 0..DEMO_CREATURES {
        let (head, body) = kinds[rng.gen_range(0..kinds.len())];
        let position = Vec3::new(rng.gen_range(-20.0..20.0), 0.0, rng.gen_range(-20.0..20.0));
        let mut event = ActorSpawnEvent::creature(head, body, position);
        if body == BodyKind::Bat {
            event.flags = Flags::FLOATING;
            event.position.y = 2.0;
        }
        spawns.send(event);
    }

    info!("Queued {} demo actors", DEMO_CREATURES + 1);
}

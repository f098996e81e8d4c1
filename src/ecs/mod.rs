pub mod core;
pub mod plugins;

pub use plugins::{
    ActorPlugin, PhysicsPlugin, PrefabPlugin, PresentationPlugin, ReplicationPlugin,
    SimulationPlugins, SyncPlugin,
};

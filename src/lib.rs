/*!
# Actor Sync

Bit-packed, replicated actor state for a fixed-tick bevy simulation.

Each actor carries its authoritative state as three packed `u32` words
([`CoreState`]) and a previous-tick mirror ([`ShadowState`]). Every tick the
simulation:

1. **Ingest**: applies remote frames, spawns and despawns, knockback and input
2. **Detect**: compares core against shadow and enables per-family dirty toggles
3. **Apply**: runs the head, body, flag and team switches, copying template
   data from the [`PrefabTable`] and queueing structural edits
4. **Integrate**: advances gravity and knockback counters and moves bodies
5. **Publish**: builds render keys and replication frames

The packed words are the replication payload; remote changes are written into
[`CoreState`] and travel through the same detection and switch passes.
*/

pub mod ecs;

pub use ecs::core::{
    BodyKind, CorePlugin, CoreState, Flags, HeadKind, Motion, ShadowState, SimulationConfig,
    SimulationSet, Teams, TickContext,
};
pub use ecs::plugins::prefab::{PrefabManifest, PrefabTable};
pub use ecs::{
    ActorPlugin, PhysicsPlugin, PrefabPlugin, PresentationPlugin, ReplicationPlugin,
    SimulationPlugins, SyncPlugin,
};

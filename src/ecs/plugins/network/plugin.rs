use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use crate::ecs::core::SimulationSet;
use crate::ecs::plugins::network::components::*;
use crate::ecs::plugins::network::systems::*;

// ============================================================================
// PLUGIN DEFINITION
// ============================================================================

/// Exchanges packed actor state with the host over crossbeam channels.
/// The transport that moves frames between peers lives outside the simulation.
pub struct ReplicationPlugin {
    outbound: Sender<ReplicationFrame>,
    inbound: Receiver<ReplicationFrame>,
}

impl ReplicationPlugin {
    /// Creates the plugin together with the host's ends of both channels.
    pub fn new() -> (Self, ReplicationHost) {
        let (outbound, frames) = crossbeam_channel::unbounded();
        let (remote, inbound) = crossbeam_channel::unbounded();
        (
            Self { outbound, inbound },
            ReplicationHost { frames, remote },
        )
    }
}

impl Plugin for ReplicationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NetworkIdAllocator>()
            .init_resource::<NetworkEntityMap>()
            .init_resource::<DespawnedIds>()
            .insert_resource(ReplicationOutbox(self.outbound.clone()))
            .insert_resource(ReplicationInbox(self.inbound.clone()))
            .add_systems(
                FixedUpdate,
                (
                    apply_remote_state_system.in_set(SimulationSet::Ingest),
                    publish_replication_system.in_set(SimulationSet::Publish),
                ),
            );
    }
}

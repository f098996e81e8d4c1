use bevy::prelude::*;

use crate::ecs::core::SimulationConfig;
use crate::ecs::plugins::actor::components::*;
use crate::ecs::plugins::network::components::{
    DespawnedIds, NetworkEntityMap, NetworkId, NetworkIdAllocator,
};
use crate::ecs::plugins::physics::components::{DesiredVelocity, Facing};

pub fn actor_spawn_system(
    mut commands: Commands,
    mut spawn_events: EventReader<ActorSpawnEvent>,
    mut allocator: ResMut<NetworkIdAllocator>,
    mut map: ResMut<NetworkEntityMap>,
) {
    for event in spawn_events.read() {
        let network_id = match event.player_id {
            Some(player_id) if allocator.is_player_id(player_id) => Some(NetworkId(player_id)),
            Some(player_id) => {
                warn!("Player id {} is outside the reserved range; allocating one", player_id);
                allocator.allocate()
            }
            None => allocator.allocate(),
        };
        let Some(network_id) = network_id else {
            warn!(
                "Network id space exhausted; dropping {:?}/{:?} spawn",
                event.head, event.body
            );
            continue;
        };

        let mut actor = commands.spawn(ActorBundle::new(
            network_id,
            event.initial_state(),
            event.position,
        ));
        match event.player_id {
            Some(player_id) => actor.insert(Character { player_id }),
            None => actor.insert(Creature),
        };

        let entity = actor.id();
        if let Some(previous) = map.register(network_id, entity) {
            warn!("Network id {:?} was already live; replacing {:?}", network_id, previous);
            commands.entity(previous).despawn();
        }
        info!(
            "Spawned {:?}/{:?} actor {:?} -> {:?}",
            event.head, event.body, network_id, entity
        );
    }
}

pub fn actor_despawn_system(
    mut commands: Commands,
    mut despawn_events: EventReader<ActorDespawnEvent>,
    mut map: ResMut<NetworkEntityMap>,
    mut despawned: Option<ResMut<DespawnedIds>>,
) {
    for event in despawn_events.read() {
        if let Some(entity) = map.unregister(event.network_id) {
            commands.entity(entity).despawn();
            // Only queued when replication is running to drain it.
            if let Some(despawned) = despawned.as_mut() {
                despawned.0.push(event.network_id);
            }
            info!("Despawned actor {:?}", event.network_id);
        }
    }
}

/// Turns locomotion commands into desired velocity and facing.
pub fn locomotion_system(
    config: Res<SimulationConfig>,
    mut events: EventReader<LocomotionEvent>,
    map: Res<NetworkEntityMap>,
    mut actors: Query<(&mut DesiredVelocity, &mut Facing)>,
) {
    for event in events.read() {
        let Some((mut desired, mut facing)) = map
            .get(event.network_id)
            .and_then(|entity| actors.get_mut(entity).ok())
        else {
            continue;
        };

        match event.command {
            LocomotionCommand::Move { direction } => {
                if direction.length() > 1.1 {
                    warn!(
                        "Move direction for {:?} has magnitude {}; normalizing",
                        event.network_id,
                        direction.length()
                    );
                }
                let planar = direction.normalize_or_zero();
                desired.0 = Vec3::new(planar.x, 0.0, planar.y) * config.move_speed;
                if planar != Vec2::ZERO {
                    facing.0 = planar.x.atan2(planar.y);
                }
            }
            LocomotionCommand::Stop => {
                desired.0 = Vec3::ZERO;
            }
        }
    }
}

use bevy::prelude::*;

use crate::ecs::core::{CoreState, SimulationConfig, TickContext};
use crate::ecs::plugins::actor::components::{ActorBundle, Character, Creature};
use crate::ecs::plugins::network::components::*;
use crate::ecs::plugins::prefab::components::Prefab;

/// Publishes one frame per full tick: a delta of the actors whose packed words
/// changed, or every actor on full-sync ticks. Nothing is sent for an empty delta.
pub fn publish_replication_system(
    config: Res<SimulationConfig>,
    context: Res<TickContext>,
    outbox: Res<ReplicationOutbox>,
    mut despawned: ResMut<DespawnedIds>,
    mut actors: Query<(&NetworkId, &CoreState, &mut ReplicatedWords), Without<Prefab>>,
) {
    if !context.is_full_tick {
        return;
    }

    let interval = config.full_sync_interval_ticks;
    let full = interval > 0 && context.tick % interval == 0;

    let mut entities = Vec::new();
    for (network_id, core, mut replicated) in actors.iter_mut() {
        let words = core.words();
        if full || replicated.last_sent != Some(words) {
            entities.push(ReplicatedEntity {
                network_id: *network_id,
                words,
            });
            replicated.last_sent = Some(words);
        }
    }

    let despawned = std::mem::take(&mut despawned.0);
    if !full && entities.is_empty() && despawned.is_empty() {
        return;
    }
    entities.sort_unstable_by_key(|entity| entity.network_id);

    let frame = ReplicationFrame {
        tick: context.tick,
        kind: if full { FrameKind::Full } else { FrameKind::Delta },
        entities,
        despawned,
    };

    if outbox.0.send(frame).is_err() {
        debug!("Replication receiver is gone; dropping frame for tick {}", context.tick);
    }
}

/// Drains frames from a remote authority. Packed words overwrite the local
/// core state, so remote changes run through the same detection and switch
/// passes as local ones. Unknown ids spawn a fresh actor.
pub fn apply_remote_state_system(
    mut commands: Commands,
    inbox: Res<ReplicationInbox>,
    mut map: ResMut<NetworkEntityMap>,
    mut allocator: ResMut<NetworkIdAllocator>,
    mut actors: Query<(&mut CoreState, &mut ReplicatedWords)>,
) {
    for frame in inbox.0.try_iter() {
        for remote in frame.entities {
            let core = CoreState::from_words(remote.words);

            let Some(entity) = map.get(remote.network_id) else {
                allocator.observe(remote.network_id);
                let mut actor = commands.spawn(ActorBundle::new(remote.network_id, core, Vec3::ZERO));
                actor.insert(ReplicatedWords {
                    last_sent: Some(remote.words),
                });
                if allocator.is_player_id(remote.network_id.0) {
                    actor.insert(Character {
                        player_id: remote.network_id.0,
                    });
                } else {
                    actor.insert(Creature);
                }
                map.register(remote.network_id, actor.id());
                debug!("Spawned remote actor {:?}", remote.network_id);
                continue;
            };

            match actors.get_mut(entity) {
                Ok((mut local, mut replicated)) => {
                    local.set_if_neq(core);
                    replicated.last_sent = Some(remote.words);
                }
                // Spawned earlier in this drain; the queued insert lands after the spawn.
                Err(_) => {
                    commands.entity(entity).insert((
                        core,
                        ReplicatedWords {
                            last_sent: Some(remote.words),
                        },
                    ));
                }
            }
        }

        for network_id in frame.despawned {
            if let Some(entity) = map.unregister(network_id) {
                commands.entity(entity).despawn();
            }
        }
    }
}

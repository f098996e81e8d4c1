use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ecs::core::PackedWords;

// ============================================================================
// IDENTITY
// ============================================================================

/// Stable id shared by every peer that replicates the actor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(pub u32);

/// Hands out network ids. Player ids are taken verbatim from a reserved low
/// range; everything else is numbered from the end of that range.
///
/// Once `u32::MAX` has been handed out or observed the allocator is exhausted
/// and refuses further allocations.
#[derive(Resource, Debug, Clone)]
pub struct NetworkIdAllocator {
    next_id: Option<u32>,
    player_range: (u32, u32),
}

impl NetworkIdAllocator {
    pub const FIRST_OBJECT_ID: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            next_id: Some(Self::FIRST_OBJECT_ID),
            player_range: (1, Self::FIRST_OBJECT_ID - 1),
        }
    }

    pub fn allocate(&mut self) -> Option<NetworkId> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(NetworkId(id))
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_id.is_none()
    }

    pub fn is_player_id(&self, id: u32) -> bool {
        id >= self.player_range.0 && id <= self.player_range.1
    }

    /// Keeps locally allocated ids clear of ids that arrived from a peer.
    pub fn observe(&mut self, id: NetworkId) {
        if self.is_player_id(id.0) {
            return;
        }
        if let Some(next) = self.next_id {
            if id.0 >= next {
                self.next_id = id.0.checked_add(1);
            }
        }
    }
}

impl Default for NetworkIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Network id to live entity.
#[derive(Resource, Debug, Default)]
pub struct NetworkEntityMap {
    entities: HashMap<NetworkId, Entity>,
}

impl NetworkEntityMap {
    pub fn register(&mut self, id: NetworkId, entity: Entity) -> Option<Entity> {
        self.entities.insert(id, entity)
    }

    pub fn unregister(&mut self, id: NetworkId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn get(&self, id: NetworkId) -> Option<Entity> {
        self.entities.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// ============================================================================
// REPLICATION STATE
// ============================================================================

/// The packed words most recently exchanged for this actor, in either direction.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplicatedWords {
    pub last_sent: Option<PackedWords>,
}

/// Network ids despawned since the last published frame.
#[derive(Resource, Debug, Default)]
pub struct DespawnedIds(pub Vec<NetworkId>);

// ============================================================================
// WIRE FRAMES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    /// Every live actor.
    Full,
    /// Only actors whose packed words changed since they were last sent.
    Delta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicatedEntity {
    pub network_id: NetworkId,
    pub words: PackedWords,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationFrame {
    pub tick: u64,
    pub kind: FrameKind,
    pub entities: Vec<ReplicatedEntity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub despawned: Vec<NetworkId>,
}

// ============================================================================
// CHANNELS
// ============================================================================

#[derive(Resource)]
pub struct ReplicationOutbox(pub Sender<ReplicationFrame>);

#[derive(Resource)]
pub struct ReplicationInbox(pub Receiver<ReplicationFrame>);

/// Host side of the replication channels: frames published by the simulation,
/// and a sender for frames received from a remote authority.
#[derive(Clone)]
pub struct ReplicationHost {
    pub frames: Receiver<ReplicationFrame>,
    pub remote: Sender<ReplicationFrame>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_skips_player_range_and_remote_ids() {
        let mut allocator = NetworkIdAllocator::new();
        assert_eq!(allocator.allocate(), Some(NetworkId(10_000)));

        allocator.observe(NetworkId(10_050));
        assert_eq!(allocator.allocate(), Some(NetworkId(10_051)));

        allocator.observe(NetworkId(7));
        assert_eq!(allocator.allocate(), Some(NetworkId(10_052)));
        assert!(allocator.is_player_id(7));
        assert!(!allocator.is_player_id(10_000));
    }

    #[test]
    fn allocator_stops_at_the_top_of_the_id_space() {
        let mut allocator = NetworkIdAllocator::new();
        allocator.observe(NetworkId(u32::MAX - 1));
        assert_eq!(allocator.allocate(), Some(NetworkId(u32::MAX)));
        assert!(allocator.is_exhausted());
        assert_eq!(allocator.allocate(), None);

        // Observing after exhaustion must not wrap back to low ids.
        allocator.observe(NetworkId(u32::MAX));
        allocator.observe(NetworkId(20_000));
        assert_eq!(allocator.allocate(), None);
    }

    #[test]
    fn frame_json_omits_empty_despawn_list() {
        let frame = ReplicationFrame {
            tick: 3,
            kind: FrameKind::Delta,
            entities: vec![ReplicatedEntity {
                network_id: NetworkId(10_000),
                words: [1, 2, 3],
            }],
            despawned: Vec::new(),
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(!json.contains("despawned"));
        assert_eq!(serde_json::from_str::<ReplicationFrame>(&json).unwrap(), frame);
    }
}

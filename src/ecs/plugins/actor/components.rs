use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ecs::core::*;
use crate::ecs::plugins::network::components::{NetworkId, ReplicatedWords};
use crate::ecs::plugins::physics::components::{
    DesiredVelocity, Facing, LinearVelocity, PhysicsMass, Position,
};
use crate::ecs::plugins::presentation::components::RenderKey;

/// Actor driven by a connected player.
#[derive(Component, Debug, Clone, Copy)]
pub struct Character {
    pub player_id: u32,
}

/// Actor driven by the server.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Creature;

/// Everything a live actor needs before its first tick.
///
/// The shadow starts zeroed, so the first detection pass raises every field
/// family that differs from the default and the switch passes copy template
/// data in the usual way. No spawn-time special case exists.
#[derive(Bundle)]
pub struct ActorBundle {
    pub core: CoreState,
    pub shadow: ShadowState,
    pub dirty: DirtyMarkers,
    pub flag_markers: FlagMarkers,
    pub team_markers: TeamMarkers,
    pub mass: PhysicsMass,
    pub position: Position,
    pub velocity: LinearVelocity,
    pub desired: DesiredVelocity,
    pub facing: Facing,
    pub render: RenderKey,
    pub network_id: NetworkId,
    pub replicated: ReplicatedWords,
}

impl ActorBundle {
    pub fn new(network_id: NetworkId, core: CoreState, position: Vec3) -> Self {
        Self {
            core,
            shadow: ShadowState::default(),
            dirty: DirtyMarkers::default(),
            flag_markers: FlagMarkers::default(),
            team_markers: TeamMarkers::default(),
            mass: PhysicsMass::default(),
            position: Position(position),
            velocity: LinearVelocity::default(),
            desired: DesiredVelocity::default(),
            facing: Facing::default(),
            render: RenderKey::default(),
            network_id,
            replicated: ReplicatedWords::default(),
        }
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[derive(Event, Debug, Clone)]
pub struct ActorSpawnEvent {
    pub head: HeadKind,
    pub body: BodyKind,
    pub flags: Flags,
    pub teams: Teams,
    pub position: Vec3,
    /// Set for player characters; the player id doubles as the network id.
    pub player_id: Option<u32>,
}

impl ActorSpawnEvent {
    pub fn creature(head: HeadKind, body: BodyKind, position: Vec3) -> Self {
        Self {
            head,
            body,
            flags: Flags::empty(),
            teams: Teams::MONSTERS,
            position,
            player_id: None,
        }
    }

    pub fn character(player_id: u32, position: Vec3) -> Self {
        Self {
            head: HeadKind::Player,
            body: BodyKind::Player,
            flags: Flags::empty(),
            teams: Teams::PLAYERS,
            position,
            player_id: Some(player_id),
        }
    }

    pub fn initial_state(&self) -> CoreState {
        let mut core = CoreState::new(self.head, self.body);
        core.set_flags(self.flags);
        core.set_teams(self.teams);
        core
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ActorDespawnEvent {
    pub network_id: NetworkId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LocomotionCommand {
    /// Planar direction; x maps to world X and y to world Z.
    Move { direction: Vec2 },
    Stop,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct LocomotionEvent {
    pub network_id: NetworkId,
    pub command: LocomotionCommand,
}

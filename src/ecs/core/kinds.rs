use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Which head asset/behaviour an actor currently uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum HeadKind {
    #[default]
    None = 0,
    Player = 1,
    Goblin = 2,
    Slime = 3,
    Skeleton = 4,
    Bat = 5,
    Golem = 6,
}

impl HeadKind {
    pub const ALL: [HeadKind; 7] = [
        HeadKind::None,
        HeadKind::Player,
        HeadKind::Goblin,
        HeadKind::Slime,
        HeadKind::Skeleton,
        HeadKind::Bat,
        HeadKind::Golem,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub const fn raw(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            HeadKind::None => "None",
            HeadKind::Player => "Player",
            HeadKind::Goblin => "Goblin",
            HeadKind::Slime => "Slime",
            HeadKind::Skeleton => "Skeleton",
            HeadKind::Bat => "Bat",
            HeadKind::Golem => "Golem",
        }
    }
}

/// Which body (collider, mass, locomotion) an actor currently uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u16)]
pub enum BodyKind {
    #[default]
    None = 0,
    Player = 1,
    Goblin = 2,
    Slime = 3,
    Skeleton = 4,
    Bat = 5,
    Golem = 6,
    Arrow = 7,
    Crate = 8,
}

impl BodyKind {
    pub const ALL: [BodyKind; 9] = [
        BodyKind::None,
        BodyKind::Player,
        BodyKind::Goblin,
        BodyKind::Slime,
        BodyKind::Skeleton,
        BodyKind::Bat,
        BodyKind::Golem,
        BodyKind::Arrow,
        BodyKind::Crate,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub const fn raw(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            BodyKind::None => "None",
            BodyKind::Player => "Player",
            BodyKind::Goblin => "Goblin",
            BodyKind::Slime => "Slime",
            BodyKind::Skeleton => "Skeleton",
            BodyKind::Bat => "Bat",
            BodyKind::Golem => "Golem",
            BodyKind::Arrow => "Arrow",
            BodyKind::Crate => "Crate",
        }
    }
}

/// Animation/locomotion state, read by presentation to pick sprite frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Motion {
    #[default]
    Idle = 0,
    Walk = 1,
    Run = 2,
    Jump = 3,
    Fall = 4,
    Land = 5,
    Hurt = 6,
    Attack = 7,
    Cast = 8,
    Die = 9,
    Spawn = 10,
}

impl Motion {
    const ALL: [Motion; 11] = [
        Motion::Idle,
        Motion::Walk,
        Motion::Run,
        Motion::Jump,
        Motion::Fall,
        Motion::Land,
        Motion::Hurt,
        Motion::Attack,
        Motion::Cast,
        Motion::Die,
        Motion::Spawn,
    ];

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Motions the simulation may pick on its own. Everything else is owned by gameplay.
    pub const fn is_locomotion(self) -> bool {
        matches!(
            self,
            Motion::Idle | Motion::Walk | Motion::Run | Motion::Fall | Motion::Land | Motion::Hurt
        )
    }
}

bitflags! {
    /// Independent per-actor toggles replicated in word 0.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Flags: u8 {
        const PINNED     = 1 << 0;
        const FLOATING   = 1 << 1;
        const PIERCING   = 1 << 2;
        const INVINCIBLE = 1 << 3;
        const HIDDEN     = 1 << 4;
        const STUNNED    = 1 << 5;
    }
}

bitflags! {
    /// Team membership bits, used by other systems for query filtering.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Teams: u8 {
        const PLAYERS  = 1 << 0;
        const MONSTERS = 1 << 1;
        const NEUTRAL  = 1 << 2;
    }
}

bitflags! {
    /// Archetype tags carried by the immutable config blob.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ConfigTags: u16 {
        const HUMANOID   = 1 << 0;
        const FLYING     = 1 << 1;
        const UNDEAD     = 1 << 2;
        const PROJECTILE = 1 << 3;
        const PROP       = 1 << 4;
        const BOSS       = 1 << 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::core::bitfield::Field;

    #[test]
    fn kind_spaces_fit_their_bit_budget() {
        assert!(HeadKind::COUNT as u32 <= Field::HeadKind.range().max_value() + 1);
        assert!(BodyKind::COUNT as u32 <= Field::BodyKind.range().max_value() + 1);
        assert!(Motion::ALL.len() as u32 <= Field::Motion.range().max_value() + 1);
    }

    #[test]
    fn raw_values_match_table_positions() {
        for (index, kind) in BodyKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.raw() as usize, index);
            assert_eq!(BodyKind::from_raw(index as u32), Some(kind));
        }
        assert_eq!(BodyKind::from_raw(700), None);
        assert_eq!(HeadKind::from_raw(63), None);
    }

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(BodyKind::from_name("skeleton"), Some(BodyKind::Skeleton));
        assert_eq!(HeadKind::from_name("GOLEM"), Some(HeadKind::Golem));
        assert_eq!(HeadKind::from_name("Dragon"), None);
    }

    #[test]
    fn reserved_flag_bits_survive_a_round_trip() {
        let flags = Flags::from_bits_retain(0b1100_0001);
        assert!(flags.contains(Flags::PINNED));
        assert_eq!(flags.bits(), 0b1100_0001);
    }
}

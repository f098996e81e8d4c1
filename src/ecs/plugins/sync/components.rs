use bevy::prelude::*;

use crate::ecs::core::{BodyKind, HeadKind};

// ============================================================================
// BEHAVIOUR COMPONENTS
// ============================================================================

// Head behaviours.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerBrain;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MeleeBrain;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct RangedBrain;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SwarmBrain;

// Body behaviours.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Humanoid;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Crawler;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Flyer;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Projectile;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Prop;

// ============================================================================
// KIND -> COMPONENT DISPATCH
// ============================================================================

/// The component tied to a kind, with its structural insert/remove operations.
#[derive(Debug)]
pub struct BehaviorDescriptor {
    pub name: &'static str,
    pub insert: fn(&mut EntityCommands),
    pub remove: fn(&mut EntityCommands),
}

impl PartialEq for BehaviorDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

fn insert_default<T: Component + Default>(entity: &mut EntityCommands) {
    entity.insert(T::default());
}

fn remove_component<T: Component>(entity: &mut EntityCommands) {
    entity.remove::<T>();
}

macro_rules! behavior {
    ($component:ty) => {
        BehaviorDescriptor {
            name: stringify!($component),
            insert: insert_default::<$component>,
            remove: remove_component::<$component>,
        }
    };
}

static PLAYER_BRAIN: BehaviorDescriptor = behavior!(PlayerBrain);
static MELEE_BRAIN: BehaviorDescriptor = behavior!(MeleeBrain);
static RANGED_BRAIN: BehaviorDescriptor = behavior!(RangedBrain);
static SWARM_BRAIN: BehaviorDescriptor = behavior!(SwarmBrain);

static HUMANOID: BehaviorDescriptor = behavior!(Humanoid);
static CRAWLER: BehaviorDescriptor = behavior!(Crawler);
static FLYER: BehaviorDescriptor = behavior!(Flyer);
static PROJECTILE: BehaviorDescriptor = behavior!(Projectile);
static PROP: BehaviorDescriptor = behavior!(Prop);

impl HeadKind {
    pub fn behavior(self) -> Option<&'static BehaviorDescriptor> {
        match self {
            HeadKind::None => None,
            HeadKind::Player => Some(&PLAYER_BRAIN),
            HeadKind::Goblin | HeadKind::Skeleton | HeadKind::Golem => Some(&MELEE_BRAIN),
            HeadKind::Slime => Some(&SWARM_BRAIN),
            HeadKind::Bat => Some(&RANGED_BRAIN),
        }
    }
}

impl BodyKind {
    pub fn behavior(self) -> Option<&'static BehaviorDescriptor> {
        match self {
            BodyKind::None => None,
            BodyKind::Player | BodyKind::Goblin | BodyKind::Skeleton | BodyKind::Golem => {
                Some(&HUMANOID)
            }
            BodyKind::Slime => Some(&CRAWLER),
            BodyKind::Bat => Some(&FLYER),
            BodyKind::Arrow => Some(&PROJECTILE),
            BodyKind::Crate => Some(&PROP),
        }
    }
}

/// Queues removal of the old kind's component and insertion of the new one.
/// Nothing is queued when both kinds map to the same component.
pub fn swap_behavior(
    entity: &mut EntityCommands,
    old: Option<&'static BehaviorDescriptor>,
    new: Option<&'static BehaviorDescriptor>,
) {
    if old == new {
        return;
    }
    if let Some(old) = old {
        (old.remove)(entity);
    }
    if let Some(new) = new {
        (new.insert)(entity);
    }
}

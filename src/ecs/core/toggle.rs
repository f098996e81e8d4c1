use bevy::prelude::*;
use std::fmt;
use std::marker::PhantomData;

/// Enableable marker: a per-entity boolean that is flipped in place instead of
/// being added or removed, so toggling it never moves the entity between archetypes.
#[derive(Component)]
pub struct Toggle<M: Send + Sync + 'static> {
    enabled: bool,
    marker: PhantomData<M>,
}

impl<M: Send + Sync + 'static> Toggle<M> {
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            marker: PhantomData,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<M: Send + Sync + 'static> Default for Toggle<M> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<M: Send + Sync + 'static> Clone for Toggle<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Send + Sync + 'static> Copy for Toggle<M> {}

impl<M: Send + Sync + 'static> PartialEq for Toggle<M> {
    fn eq(&self, other: &Self) -> bool {
        self.enabled == other.enabled
    }
}

impl<M: Send + Sync + 'static> Eq for Toggle<M> {}

impl<M: Send + Sync + 'static> fmt::Debug for Toggle<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<M>();
        let short = name.rsplit("::").next().unwrap_or(name);
        write!(f, "Toggle<{short}>({})", self.enabled)
    }
}

/// Flips the toggle without tripping bevy change detection when nothing changes.
pub fn set_toggle<M: Send + Sync + 'static>(toggle: &mut Mut<Toggle<M>>, enabled: bool) {
    toggle.set_if_neq(Toggle::new(enabled));
}

// Dirty markers, one per field family.
pub struct HeadDirty;
pub struct BodyDirty;
pub struct FlagDirty;
pub struct TeamDirty;

// Flag markers with no physics consequence.
pub struct Floating;
pub struct Invincible;
pub struct Hidden;
pub struct Stunned;

// Team markers.
pub struct PlayersTeam;
pub struct MonstersTeam;
pub struct NeutralTeam;

#[derive(Bundle, Default)]
pub struct DirtyMarkers {
    pub head: Toggle<HeadDirty>,
    pub body: Toggle<BodyDirty>,
    pub flags: Toggle<FlagDirty>,
    pub teams: Toggle<TeamDirty>,
}

#[derive(Bundle, Default)]
pub struct FlagMarkers {
    pub floating: Toggle<Floating>,
    pub invincible: Toggle<Invincible>,
    pub hidden: Toggle<Hidden>,
    pub stunned: Toggle<Stunned>,
}

#[derive(Bundle, Default)]
pub struct TeamMarkers {
    pub players: Toggle<PlayersTeam>,
    pub monsters: Toggle<MonstersTeam>,
    pub neutral: Toggle<NeutralTeam>,
}

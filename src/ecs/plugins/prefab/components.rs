use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

use crate::ecs::core::{BodyKind, ConfigTags, HeadKind};

/// Immutable per-archetype constants, created once at bake time.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityConfig {
    pub rough_height: f32,
    pub rough_radius: f32,
    pub default_mass: f32,
    pub tags: ConfigTags,
    pub sprite_id: u16,
}

impl EntityConfig {
    pub fn inverse_mass(&self) -> f32 {
        if self.default_mass > 0.0 {
            1.0 / self.default_mass
        } else {
            0.0
        }
    }
}

/// Reference to a shared [`EntityConfig`]. Cloning shares, never copies.
#[derive(Component, Debug, Clone)]
pub struct ConfigBlob(Arc<EntityConfig>);

impl ConfigBlob {
    pub fn new(config: EntityConfig) -> Self {
        Self(Arc::new(config))
    }

    pub fn shares_with(&self, other: &ConfigBlob) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ConfigBlob {
    type Target = EntityConfig;

    fn deref(&self) -> &EntityConfig {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadConfig {
    pub sprite_id: u16,
    pub sight_range: f32,
    pub attack_cooldown_ms: u32,
}

/// Shared head configuration copied from the head template on switch.
#[derive(Component, Debug, Clone)]
pub struct HeadProfile(Arc<HeadConfig>);

impl HeadProfile {
    pub fn new(config: HeadConfig) -> Self {
        Self(Arc::new(config))
    }
}

impl Deref for HeadProfile {
    type Target = HeadConfig;

    fn deref(&self) -> &HeadConfig {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffect {
    Regenerating,
    Poisoned,
    Burning,
    Frozen,
    Blessed,
}

/// Auxiliary status buffer seeded from the head template.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct StatusEffects(pub Vec<StatusEffect>);

/// Marks a non-simulated template entity. Simulation queries exclude it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Prefab;

/// Dense kind → template lookup, filled once at bake and read-only afterwards.
#[derive(Resource, Debug, Clone)]
pub struct PrefabTable {
    heads: Vec<Option<Entity>>,
    bodies: Vec<Option<Entity>>,
}

impl Default for PrefabTable {
    fn default() -> Self {
        Self {
            heads: vec![None; HeadKind::COUNT],
            bodies: vec![None; BodyKind::COUNT],
        }
    }
}

impl PrefabTable {
    pub fn find_head(&self, kind: HeadKind) -> Option<Entity> {
        self.heads.get(kind as usize).copied().flatten()
    }

    pub fn find_body(&self, kind: BodyKind) -> Option<Entity> {
        self.bodies.get(kind as usize).copied().flatten()
    }

    pub fn register_head(&mut self, kind: HeadKind, template: Entity) -> Option<Entity> {
        self.heads[kind as usize].replace(template)
    }

    pub fn register_body(&mut self, kind: BodyKind, template: Entity) -> Option<Entity> {
        self.bodies[kind as usize].replace(template)
    }

    /// Kinds other than `None` with no template. Switching to these is a no-op.
    pub fn missing_heads(&self) -> impl Iterator<Item = HeadKind> + '_ {
        HeadKind::ALL
            .into_iter()
            .filter(|kind| *kind != HeadKind::None && self.find_head(*kind).is_none())
    }

    pub fn missing_bodies(&self) -> impl Iterator<Item = BodyKind> + '_ {
        BodyKind::ALL
            .into_iter()
            .filter(|kind| *kind != BodyKind::None && self.find_body(*kind).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_reports_everything_but_none_missing() {
        let table = PrefabTable::default();
        assert_eq!(table.missing_bodies().count(), BodyKind::COUNT - 1);
        assert_eq!(table.find_body(BodyKind::None), None);
    }

    #[test]
    fn registration_replaces_previous_template() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();

        let mut table = PrefabTable::default();
        assert_eq!(table.register_body(BodyKind::Crate, first), None);
        assert_eq!(table.register_body(BodyKind::Crate, second), Some(first));
        assert_eq!(table.find_body(BodyKind::Crate), Some(second));
        assert!(table.missing_bodies().all(|kind| kind != BodyKind::Crate));
    }

    #[test]
    fn zero_mass_config_is_immovable() {
        let config = EntityConfig {
            rough_height: 1.0,
            rough_radius: 1.0,
            default_mass: 0.0,
            tags: ConfigTags::PROP,
            sprite_id: 0,
        };
        assert_eq!(config.inverse_mass(), 0.0);
    }
}

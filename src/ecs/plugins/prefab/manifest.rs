/*!
# Prefab Manifest

The static registry that maps name strings to head and body template
definitions. It is read once at startup by [`bake_prefabs_system`] which turns
every definition into a template entity and records it in the
[`PrefabTable`].

[`bake_prefabs_system`]: crate::ecs::plugins::prefab::systems::bake_prefabs_system
[`PrefabTable`]: crate::ecs::plugins::prefab::components::PrefabTable
*/

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::ecs::core::{ConfigTags, ManifestError, Motion};
use crate::ecs::plugins::physics::components::{CollisionLayers, ShapeKind};
use crate::ecs::plugins::prefab::components::StatusEffect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPrefabDef {
    pub name: String,
    pub rough_height: f32,
    pub rough_radius: f32,
    pub default_mass: f32,
    #[serde(default)]
    pub tags: ConfigTags,
    #[serde(default)]
    pub sprite_id: u16,
    pub shape: ShapeKind,
    pub belongs_to: CollisionLayers,
    pub collides_with: CollisionLayers,
    #[serde(default)]
    pub default_motion: Motion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadPrefabDef {
    pub name: String,
    #[serde(default)]
    pub sprite_id: u16,
    pub sight_range: f32,
    #[serde(default)]
    pub attack_cooldown_ms: u32,
    #[serde(default)]
    pub status: Vec<StatusEffect>,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefabManifest {
    #[serde(default)]
    pub bodies: Vec<BodyPrefabDef>,
    #[serde(default)]
    pub heads: Vec<HeadPrefabDef>,
}

impl PrefabManifest {
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for body in &self.bodies {
            if !(body.default_mass > 0.0) {
                return Err(ManifestError::InvalidMass {
                    name: body.name.clone(),
                    mass: body.default_mass,
                });
            }
            if !seen.insert(("body", body.name.to_ascii_lowercase())) {
                return Err(ManifestError::Duplicate {
                    name: body.name.clone(),
                });
            }
        }
        for head in &self.heads {
            if !seen.insert(("head", head.name.to_ascii_lowercase())) {
                return Err(ManifestError::Duplicate {
                    name: head.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Templates for every built-in kind.
    pub fn builtin() -> Self {
        let actor = CollisionLayers::STATIC
            | CollisionLayers::CHARACTERS
            | CollisionLayers::CREATURES
            | CollisionLayers::PROJECTILES
            | CollisionLayers::PROPS;

        let capsule = |radius, height| ShapeKind::Capsule { radius, height };
        let body = |name: &str,
                    height: f32,
                    radius: f32,
                    mass: f32,
                    tags: ConfigTags,
                    sprite_id: u16,
                    shape: ShapeKind,
                    belongs_to: CollisionLayers,
                    collides_with: CollisionLayers| BodyPrefabDef {
            name: name.to_string(),
            rough_height: height,
            rough_radius: radius,
            default_mass: mass,
            tags,
            sprite_id,
            shape,
            belongs_to,
            collides_with,
            default_motion: Motion::Idle,
        };
        let head = |name: &str, sprite_id: u16, sight_range: f32, attack_cooldown_ms: u32, status: Vec<StatusEffect>| HeadPrefabDef {
            name: name.to_string(),
            sprite_id,
            sight_range,
            attack_cooldown_ms,
            status,
        };

        Self {
            bodies: vec![
                body("Player", 1.8, 0.4, 70.0, ConfigTags::HUMANOID, 1, capsule(0.4, 1.0), CollisionLayers::CHARACTERS, actor),
                body("Goblin", 1.2, 0.35, 40.0, ConfigTags::HUMANOID, 2, capsule(0.35, 0.5), CollisionLayers::CREATURES, actor),
                body("Slime", 0.6, 0.5, 25.0, ConfigTags::empty(), 3, ShapeKind::Sphere { radius: 0.5 }, CollisionLayers::CREATURES, actor),
                body("Skeleton", 1.8, 0.4, 35.0, ConfigTags::HUMANOID | ConfigTags::UNDEAD, 4, capsule(0.4, 1.0), CollisionLayers::CREATURES, actor),
                body("Bat", 0.4, 0.3, 2.0, ConfigTags::FLYING, 5, ShapeKind::Sphere { radius: 0.3 }, CollisionLayers::CREATURES, actor),
                body("Golem", 3.0, 1.0, 800.0, ConfigTags::BOSS, 6, capsule(1.0, 1.0), CollisionLayers::CREATURES, actor),
                BodyPrefabDef {
                    default_motion: Motion::Spawn,
                    ..body("Arrow", 0.1, 0.05, 0.1, ConfigTags::PROJECTILE, 7, ShapeKind::Sphere { radius: 0.05 }, CollisionLayers::PROJECTILES, actor - CollisionLayers::PROJECTILES)
                },
                body("Crate", 1.0, 0.5, 20.0, ConfigTags::PROP, 8, ShapeKind::Cuboid { half_extents: Vec3::splat(0.5) }, CollisionLayers::PROPS, actor),
            ],
            heads: vec![
                head("Player", 101, 0.0, 400, vec![]),
                head("Goblin", 102, 8.0, 900, vec![]),
                head("Slime", 103, 4.0, 1500, vec![StatusEffect::Regenerating]),
                head("Skeleton", 104, 10.0, 1200, vec![]),
                head("Bat", 105, 12.0, 600, vec![]),
                head("Golem", 106, 6.0, 3000, vec![StatusEffect::Blessed]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_manifest_is_valid() {
        PrefabManifest::builtin().validate().unwrap();
    }

    #[test]
    fn json_manifest_parses_named_bits() {
        let json = r#"{
            "bodies": [{
                "name": "Crate",
                "rough_height": 1.0,
                "rough_radius": 0.5,
                "default_mass": 20.0,
                "tags": "PROP",
                "shape": { "Sphere": { "radius": 0.5 } },
                "belongs_to": "PROPS",
                "collides_with": "STATIC | CHARACTERS"
            }],
            "heads": [{ "name": "Bat", "sight_range": 12.0, "status": ["Frozen"] }]
        }"#;

        let manifest = PrefabManifest::from_json_str(json).unwrap();
        let body = &manifest.bodies[0];
        assert_eq!(body.tags, ConfigTags::PROP);
        assert_eq!(
            body.collides_with,
            CollisionLayers::STATIC | CollisionLayers::CHARACTERS
        );
        assert_eq!(body.default_motion, Motion::Idle);
        assert_eq!(manifest.heads[0].status, vec![StatusEffect::Frozen]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut manifest = PrefabManifest::builtin();
        let copy = manifest.bodies[0].clone();
        manifest.bodies.push(copy);
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::Duplicate { .. })
        ));
    }

    #[test]
    fn massless_body_is_rejected() {
        let mut manifest = PrefabManifest::builtin();
        manifest.bodies[0].default_mass = 0.0;
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidMass { .. })
        ));
    }
}

use bevy::prelude::*;

use crate::ecs::core::{BodyKind, CoreState, HeadKind};
use crate::ecs::plugins::physics::components::{Collider, ColliderShape, CollisionFilter, PhysicsMass};
use crate::ecs::plugins::prefab::components::*;
use crate::ecs::plugins::prefab::manifest::{BodyPrefabDef, HeadPrefabDef, PrefabManifest};

/// Components a body template carries, copied onto actors on a body switch.
#[derive(Bundle)]
pub struct BodyTemplateBundle {
    pub prefab: Prefab,
    pub core: CoreState,
    pub config: ConfigBlob,
    pub collider: Collider,
    pub mass: PhysicsMass,
}

impl BodyTemplateBundle {
    pub fn new(kind: BodyKind, def: &BodyPrefabDef) -> Self {
        let mut core = CoreState::new(HeadKind::None, kind);
        core.set_motion(def.default_motion);

        Self {
            prefab: Prefab,
            core,
            config: ConfigBlob::new(EntityConfig {
                rough_height: def.rough_height,
                rough_radius: def.rough_radius,
                default_mass: def.default_mass,
                tags: def.tags,
                sprite_id: def.sprite_id,
            }),
            collider: Collider::new(ColliderShape {
                kind: def.shape,
                filter: CollisionFilter {
                    belongs_to: def.belongs_to,
                    collides_with: def.collides_with,
                },
            }),
            mass: PhysicsMass::from_mass(def.default_mass),
        }
    }
}

/// Components a head template carries, copied onto actors on a head switch.
#[derive(Bundle)]
pub struct HeadTemplateBundle {
    pub prefab: Prefab,
    pub profile: HeadProfile,
    pub status: StatusEffects,
}

impl HeadTemplateBundle {
    pub fn new(def: &HeadPrefabDef) -> Self {
        Self {
            prefab: Prefab,
            profile: HeadProfile::new(HeadConfig {
                sprite_id: def.sprite_id,
                sight_range: def.sight_range,
                attack_cooldown_ms: def.attack_cooldown_ms,
            }),
            status: StatusEffects(def.status.clone()),
        }
    }
}

/// Startup: spawn one template entity per manifest entry and index it by kind.
///
/// Unknown names and kinds left without a template are reported here, once,
/// so the simulation itself can treat them as silent no-ops.
pub fn bake_prefabs_system(
    mut commands: Commands,
    manifest: Res<PrefabManifest>,
    mut table: ResMut<PrefabTable>,
) {
    for def in &manifest.bodies {
        let Some(kind) = BodyKind::from_name(&def.name).filter(|k| *k != BodyKind::None) else {
            warn!("Prefab manifest names unknown body '{}'", def.name);
            continue;
        };
        let template = commands
            .spawn((BodyTemplateBundle::new(kind, def), Name::new(format!("Body:{}", kind.name()))))
            .id();
        if let Some(previous) = table.register_body(kind, template) {
            commands.entity(previous).despawn();
        }
    }

    for def in &manifest.heads {
        let Some(kind) = HeadKind::from_name(&def.name).filter(|k| *k != HeadKind::None) else {
            warn!("Prefab manifest names unknown head '{}'", def.name);
            continue;
        };
        let template = commands
            .spawn((HeadTemplateBundle::new(def), Name::new(format!("Head:{}", kind.name()))))
            .id();
        if let Some(previous) = table.register_head(kind, template) {
            commands.entity(previous).despawn();
        }
    }

    for kind in table.missing_bodies() {
        warn!("No body prefab for {:?}; switching to it will be skipped", kind);
    }
    for kind in table.missing_heads() {
        warn!("No head prefab for {:?}; switching to it will be skipped", kind);
    }

    info!(
        "Baked {} body and {} head prefabs",
        manifest.bodies.len(),
        manifest.heads.len()
    );
}

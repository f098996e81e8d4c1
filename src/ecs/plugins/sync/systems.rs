/*!
# State Sync Systems

One detection pass and four switch passes per tick.

Detection compares every actor's [`CoreState`] against its [`ShadowState`] and
enables the dirty toggle of each field family that differs. It is the only
system that enables dirty toggles; gameplay and replication write the core
state and nothing else.

Each switch pass handles exactly one family. For an actor whose toggle is
enabled it disables the toggle, applies the side effects of the transition and
then syncs that family of the shadow. Structural edits go through
[`ParallelCommands`] and land at the sync point before the next stage.

When a kind has no template the pass leaves the shadow untouched, so the
actor is flagged again on the next tick instead of looking handled.
*/

use bevy::prelude::*;

use crate::ecs::core::*;
use crate::ecs::plugins::physics::components::{Collider, CollisionLayers, PhysicsMass};
use crate::ecs::plugins::prefab::components::{
    ConfigBlob, HeadProfile, Prefab, PrefabTable, StatusEffects,
};
use crate::ecs::plugins::sync::components::swap_behavior;

// ============================================================================
// CHANGE DETECTION
// ============================================================================

pub fn detect_state_changes_system(
    mut actors: Query<
        (
            &CoreState,
            &ShadowState,
            &mut Toggle<HeadDirty>,
            &mut Toggle<BodyDirty>,
            &mut Toggle<FlagDirty>,
            &mut Toggle<TeamDirty>,
        ),
        Without<Prefab>,
    >,
) {
    actors
        .par_iter_mut()
        .for_each(|(core, shadow, mut head, mut body, mut flags, mut teams)| {
            let changed = shadow.diff(core);
            if changed.contains(ChangedFields::HEAD) {
                set_toggle(&mut head, true);
            }
            if changed.contains(ChangedFields::BODY) {
                set_toggle(&mut body, true);
            }
            if changed.contains(ChangedFields::FLAGS) {
                set_toggle(&mut flags, true);
            }
            if changed.contains(ChangedFields::TEAMS) {
                set_toggle(&mut teams, true);
            }
        });
}

// ============================================================================
// HEAD / BODY SWITCHES
// ============================================================================

pub fn head_switch_system(
    par_commands: ParallelCommands,
    prefabs: Res<PrefabTable>,
    templates: Query<(&HeadProfile, &StatusEffects), With<Prefab>>,
    mut actors: Query<
        (Entity, &CoreState, &mut ShadowState, &mut Toggle<HeadDirty>),
        Without<Prefab>,
    >,
) {
    actors
        .par_iter_mut()
        .for_each(|(entity, core, mut shadow, mut dirty)| {
            if !dirty.is_enabled() {
                return;
            }
            set_toggle(&mut dirty, false);

            let Some(kind) = core.head() else {
                return;
            };
            let old = HeadKind::from_raw(shadow.head).and_then(HeadKind::behavior);

            if kind == HeadKind::None {
                par_commands.command_scope(|mut commands| {
                    let mut entity = commands.entity(entity);
                    swap_behavior(&mut entity, old, None);
                    entity.remove::<(HeadProfile, StatusEffects)>();
                });
                shadow.sync_head(core);
                return;
            }

            let Some((profile, status)) = prefabs
                .find_head(kind)
                .and_then(|template| templates.get(template).ok())
            else {
                return;
            };

            par_commands.command_scope(|mut commands| {
                let mut entity = commands.entity(entity);
                swap_behavior(&mut entity, old, kind.behavior());
                entity.insert((profile.clone(), status.clone()));
            });
            shadow.sync_head(core);
        });
}

pub fn body_switch_system(
    par_commands: ParallelCommands,
    prefabs: Res<PrefabTable>,
    templates: Query<(&CoreState, &ConfigBlob, &Collider, &PhysicsMass), With<Prefab>>,
    mut actors: Query<
        (
            Entity,
            &mut CoreState,
            &mut ShadowState,
            &mut Toggle<BodyDirty>,
            &mut PhysicsMass,
        ),
        Without<Prefab>,
    >,
) {
    actors
        .par_iter_mut()
        .for_each(|(entity, mut core, mut shadow, mut dirty, mut mass)| {
            if !dirty.is_enabled() {
                return;
            }
            set_toggle(&mut dirty, false);

            let Some(kind) = core.body() else {
                return;
            };
            let old = BodyKind::from_raw(shadow.body).and_then(BodyKind::behavior);

            if kind == BodyKind::None {
                par_commands.command_scope(|mut commands| {
                    let mut entity = commands.entity(entity);
                    swap_behavior(&mut entity, old, None);
                    entity.remove::<Collider>();
                });
                shadow.sync_body(&core);
                return;
            }

            let Some((template_core, config, template_collider, template_mass)) = prefabs
                .find_body(kind)
                .and_then(|template| templates.get(template).ok())
            else {
                return;
            };

            // The template knows nothing about this actor's flags; re-apply them.
            let flags = core.flags();
            *mass = if flags.contains(Flags::PINNED) {
                PhysicsMass { inverse_mass: 0.0 }
            } else {
                *template_mass
            };
            let mut collider = template_collider.clone();
            if flags.contains(Flags::PIERCING) {
                collider.set_membership(CollisionLayers::PIERCING, true);
            }
            core.set_motion(template_core.motion());

            par_commands.command_scope(|mut commands| {
                let mut entity = commands.entity(entity);
                swap_behavior(&mut entity, old, kind.behavior());
                entity.insert((config.clone(), collider));
            });
            shadow.sync_body(&core);
        });
}

// ============================================================================
// FLAG / TEAM SWITCHES
// ============================================================================

pub fn flag_switch_system(
    mut actors: Query<
        (
            &CoreState,
            &mut ShadowState,
            &mut Toggle<FlagDirty>,
            &mut PhysicsMass,
            Option<&mut Collider>,
            Option<&ConfigBlob>,
            &mut Toggle<Floating>,
            &mut Toggle<Invincible>,
            &mut Toggle<Hidden>,
            &mut Toggle<Stunned>,
        ),
        Without<Prefab>,
    >,
) {
    actors.par_iter_mut().for_each(
        |(
            core,
            mut shadow,
            mut dirty,
            mut mass,
            collider,
            config,
            mut floating,
            mut invincible,
            mut hidden,
            mut stunned,
        )| {
            if !dirty.is_enabled() {
                return;
            }
            set_toggle(&mut dirty, false);

            let new = core.flags();
            let flipped = shadow.flags ^ new;

            if flipped.contains(Flags::PINNED) {
                mass.inverse_mass = if new.contains(Flags::PINNED) {
                    0.0
                } else {
                    config.map_or(1.0, |config| config.inverse_mass())
                };
            }

            if flipped.contains(Flags::PIERCING) {
                if let Some(mut collider) = collider {
                    collider.set_membership(CollisionLayers::PIERCING, new.contains(Flags::PIERCING));
                }
            }

            set_toggle(&mut floating, new.contains(Flags::FLOATING));
            set_toggle(&mut invincible, new.contains(Flags::INVINCIBLE));
            set_toggle(&mut hidden, new.contains(Flags::HIDDEN));
            set_toggle(&mut stunned, new.contains(Flags::STUNNED));

            shadow.sync_flags(core);
        },
    );
}

pub fn team_switch_system(
    mut actors: Query<
        (
            &CoreState,
            &mut ShadowState,
            &mut Toggle<TeamDirty>,
            &mut Toggle<PlayersTeam>,
            &mut Toggle<MonstersTeam>,
            &mut Toggle<NeutralTeam>,
        ),
        Without<Prefab>,
    >,
) {
    actors.par_iter_mut().for_each(
        |(core, mut shadow, mut dirty, mut players, mut monsters, mut neutral)| {
            if !dirty.is_enabled() {
                return;
            }
            set_toggle(&mut dirty, false);

            let teams = core.teams();
            set_toggle(&mut players, teams.contains(Teams::PLAYERS));
            set_toggle(&mut monsters, teams.contains(Teams::MONSTERS));
            set_toggle(&mut neutral, teams.contains(Teams::NEUTRAL));

            shadow.sync_teams(core);
        },
    );
}

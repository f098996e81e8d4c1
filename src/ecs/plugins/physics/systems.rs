use bevy::prelude::*;

use crate::ecs::core::bitfield::seconds_to_millis;
use crate::ecs::core::*;
use crate::ecs::plugins::physics::components::*;
use crate::ecs::plugins::prefab::components::Prefab;

// ============================================================================
// IMPULSES
// ============================================================================

/// Writes queued knockback impulses into the packed state. A later impulse in
/// the same tick replaces an earlier one.
pub fn apply_knockback_system(
    mut events: EventReader<KnockbackEvent>,
    mut actors: Query<&mut CoreState, Without<Prefab>>,
) {
    for event in events.read() {
        if let Ok(mut core) = actors.get_mut(event.target) {
            core.apply_knock(event.direction, event.factor);
        }
    }
}

// ============================================================================
// COUNTERS
// ============================================================================

/// One tick airborne per full tick. Floating and pinned actors never fall.
pub fn advance_gravity_system(
    context: Res<TickContext>,
    mut actors: Query<&mut CoreState, Without<Prefab>>,
) {
    if !context.is_full_tick {
        return;
    }
    actors.par_iter_mut().for_each(|mut core| {
        let next = if core.flags().intersects(Flags::FLOATING | Flags::PINNED) {
            0
        } else {
            core.gravity_factor() as u32 + 1
        };
        if next != core.gravity_factor() as u32 {
            core.set_gravity_factor(next);
        }
    });
}

pub fn decay_knock_system(
    context: Res<TickContext>,
    mut actors: Query<&mut CoreState, Without<Prefab>>,
) {
    if !context.is_full_tick {
        return;
    }
    actors.par_iter_mut().for_each(|mut core| {
        if core.knock_factor() > 0 {
            core.decay_knock();
        }
    });
}

/// Resets gravity for contacts whose normal is close enough to up.
pub fn ground_contact_reset_system(
    config: Res<SimulationConfig>,
    mut contacts: EventReader<ContactEvent>,
    mut actors: Query<&mut CoreState, Without<Prefab>>,
) {
    let min_dot = config.min_ground_dot();
    for contact in contacts.read() {
        if contact.normal.normalize_or_zero().dot(Vec3::Y) < min_dot {
            continue;
        }
        if let Ok(mut core) = actors.get_mut(contact.entity) {
            if !core.is_grounded() {
                core.set_gravity_factor(0);
            }
        }
    }
}

// ============================================================================
// INTEGRATION
// ============================================================================

/// Rebuilds linear velocity from locomotion plus the gravity and knockback
/// contributions decoded from the packed counters.
pub fn integrate_velocity_system(
    config: Res<SimulationConfig>,
    context: Res<TickContext>,
    mut actors: Query<
        (
            &CoreState,
            &PhysicsMass,
            &DesiredVelocity,
            &Toggle<Stunned>,
            &mut LinearVelocity,
        ),
        Without<Prefab>,
    >,
) {
    let dt = context.fixed_dt;
    actors
        .par_iter_mut()
        .for_each(|(core, mass, desired, stunned, mut velocity)| {
            if mass.is_immovable() {
                velocity.set_if_neq(LinearVelocity(Vec3::ZERO));
                return;
            }

            let walk = if stunned.is_enabled() { Vec3::ZERO } else { desired.0 };
            let fall = Vec3::NEG_Y * core.gravity_factor() as f32 * dt * config.gravity_scale;
            let knock = core.knock_direction().map_or(Vec3::ZERO, |direction| {
                direction * core.knock_factor() as f32 * dt * config.knock_scale
            });

            velocity.0 = walk + fall + knock;
        });
}

pub fn integrate_position_system(
    context: Res<TickContext>,
    mut actors: Query<(&mut Position, &LinearVelocity), Without<Prefab>>,
) {
    let dt = context.fixed_dt;
    actors.par_iter_mut().for_each(|(mut position, velocity)| {
        if velocity.0 != Vec3::ZERO {
            position.0 += velocity.0 * dt;
        }
    });
}

/// Stands in for the collision solver against the flat ground plane: clamps
/// bodies that sank below it and reports an upward contact.
pub fn resolve_ground_system(
    config: Res<SimulationConfig>,
    mut contacts: EventWriter<ContactEvent>,
    mut actors: Query<(Entity, &mut Position), (With<Collider>, Without<Prefab>)>,
) {
    for (entity, mut position) in actors.iter_mut() {
        if position.0.y > config.ground_height {
            continue;
        }
        position.0.y = config.ground_height;
        contacts.send(ContactEvent {
            entity,
            normal: Vec3::Y,
        });
    }
}

// ============================================================================
// MOTION
// ============================================================================

/// Picks the locomotion motion from this tick's counter transitions. Motions
/// set by gameplay (attacks, casts, death, spawn, jump) are left alone.
pub fn select_motion_system(
    config: Res<SimulationConfig>,
    mut actors: Query<(&mut CoreState, &ShadowState, &LinearVelocity), Without<Prefab>>,
) {
    let threshold = config.fall_motion_threshold;
    let run_speed = config.move_speed * 1.5;
    let land_hold_ms = config.animation_frame_ms.saturating_mul(2);

    actors
        .par_iter_mut()
        .for_each(|(mut core, shadow, velocity)| {
            let current = core.motion();
            if !current.is_locomotion() {
                return;
            }

            let knock = core.knock_factor();
            let gravity = core.gravity_factor();
            let horizontal = Vec3::new(velocity.0.x, 0.0, velocity.0.z).length();

            let next = if knock > shadow.knock_factor || (current == Motion::Hurt && knock > 0) {
                Motion::Hurt
            } else if gravity == 0 && shadow.gravity_factor > threshold {
                Motion::Land
            } else if gravity > threshold {
                Motion::Fall
            } else if current == Motion::Land && core.motion_time_ms() < land_hold_ms {
                Motion::Land
            } else if horizontal > run_speed {
                Motion::Run
            } else if horizontal > f32::EPSILON {
                Motion::Walk
            } else {
                Motion::Idle
            };

            if next != current {
                core.set_motion(next);
            }
        });
}

pub fn advance_motion_clock_system(
    context: Res<TickContext>,
    mut actors: Query<&mut CoreState, Without<Prefab>>,
) {
    if !context.is_full_tick {
        return;
    }
    let step = seconds_to_millis(context.fixed_dt);
    actors.par_iter_mut().for_each(|mut core| {
        core.advance_motion_time(step);
    });
}

/// Mirrors the physics counters into the shadow once they are final for the tick.
pub fn sync_physics_shadow_system(
    mut actors: Query<(&CoreState, &mut ShadowState), Without<Prefab>>,
) {
    actors.par_iter_mut().for_each(|(core, mut shadow)| {
        if shadow.gravity_factor != core.gravity_factor()
            || shadow.knock_factor != core.knock_factor()
        {
            shadow.sync_physics(core);
        }
    });
}

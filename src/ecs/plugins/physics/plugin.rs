use bevy::prelude::*;

use crate::ecs::core::SimulationSet;
use crate::ecs::plugins::physics::components::{ContactEvent, KnockbackEvent};
use crate::ecs::plugins::physics::systems::*;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ContactEvent>()
            .add_event::<KnockbackEvent>()
            .add_systems(
                FixedUpdate,
                (
                    apply_knockback_system.in_set(SimulationSet::Ingest),
                    (
                        advance_gravity_system,
                        integrate_velocity_system,
                        decay_knock_system,
                        integrate_position_system,
                        resolve_ground_system,
                        ground_contact_reset_system,
                        select_motion_system,
                        advance_motion_clock_system,
                        sync_physics_shadow_system,
                    )
                        .chain()
                        .in_set(SimulationSet::Integrate),
                ),
            );
    }
}

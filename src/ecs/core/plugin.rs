use bevy::prelude::*;

use crate::ecs::core::config::{SimulationConfig, TickContext};

/// Stages of one fixed simulation tick, run strictly in this order.
///
/// Commands queued in a stage are applied before the next stage starts, so
/// structural changes never race with the parallel scans.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Remote state, spawns/despawns, impulses, contacts and input.
    Ingest,
    /// Core vs shadow comparison.
    Detect,
    /// Head, body, flag and team switches.
    Apply,
    /// Gravity, knockback, velocity and position integration.
    Integrate,
    /// Read models for presentation and replication.
    Publish,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SimulationConfig>() {
            app.insert_resource(SimulationConfig::default());
        }
        let context = TickContext::from_config(app.world().resource::<SimulationConfig>());

        app.insert_resource(context)
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Ingest,
                    SimulationSet::Detect,
                    SimulationSet::Apply,
                    SimulationSet::Integrate,
                    SimulationSet::Publish,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, advance_tick_system.before(SimulationSet::Ingest));
    }
}

/// Counts full ticks. Partial ticks replay the same tick number.
pub fn advance_tick_system(mut context: ResMut<TickContext>) {
    if context.is_full_tick {
        context.tick += 1;
    }
}

use bevy::prelude::*;

use crate::ecs::core::SimulationSet;
use crate::ecs::plugins::sync::systems::*;

pub struct SyncPlugin;

impl Plugin for SyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                detect_state_changes_system.in_set(SimulationSet::Detect),
                (
                    head_switch_system,
                    body_switch_system,
                    flag_switch_system,
                    team_switch_system,
                )
                    .chain()
                    .in_set(SimulationSet::Apply),
            ),
        );
    }
}

use bevy::prelude::*;

use crate::ecs::core::{CoreState, Hidden, SimulationConfig, TickContext, Toggle};
use crate::ecs::plugins::physics::components::Facing;
use crate::ecs::plugins::prefab::components::{ConfigBlob, Prefab};
use crate::ecs::plugins::presentation::components::*;

/// Decodes motion and clock into render keys once the tick's simulation is final.
pub fn build_render_keys_system(
    config: Res<SimulationConfig>,
    context: Res<TickContext>,
    mut actors: Query<
        (
            &CoreState,
            &Facing,
            Option<&ConfigBlob>,
            &Toggle<Hidden>,
            &mut RenderKey,
        ),
        Without<Prefab>,
    >,
) {
    let frame_ms = config.animation_frame_ms.max(1);
    actors
        .par_iter_mut()
        .for_each(|(core, facing, blob, hidden, mut key)| {
            key.set_if_neq(RenderKey {
                sprite_id: blob.map_or(0, |blob| blob.sprite_id),
                motion: core.motion(),
                direction: facing_octant(facing.0, context.camera_yaw),
                time_sample: core.motion_time_ms() / frame_ms,
                visible: !hidden.is_enabled() && blob.is_some(),
            });
        });
}

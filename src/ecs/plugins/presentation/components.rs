use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::ecs::core::Motion;

/// Number of sprite directions per motion in the atlas.
pub const SPRITE_DIRECTIONS: u8 = 8;

/// Everything the sprite renderer needs to pick a frame, rebuilt after the
/// simulation stages of each tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderKey {
    pub sprite_id: u16,
    pub motion: Motion,
    /// Octant of the actor's facing relative to the camera, 0 facing away from it.
    pub direction: u8,
    /// Frame index into the motion's strip.
    pub time_sample: u32,
    pub visible: bool,
}

/// Maps a yaw relative to the camera onto one of the sprite octants.
pub fn facing_octant(facing: f32, camera_yaw: f32) -> u8 {
    let sector = TAU / SPRITE_DIRECTIONS as f32;
    let relative = (facing - camera_yaw).rem_euclid(TAU);
    (relative / sector).round() as u8 % SPRITE_DIRECTIONS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn octants_wrap_around() {
        assert_eq!(facing_octant(0.0, 0.0), 0);
        assert_eq!(facing_octant(FRAC_PI_4, 0.0), 1);
        assert_eq!(facing_octant(PI, 0.0), 4);
        assert_eq!(facing_octant(-FRAC_PI_4, 0.0), 7);
        assert_eq!(facing_octant(TAU - 0.01, 0.0), 0);
    }

    #[test]
    fn camera_yaw_rotates_the_octant() {
        assert_eq!(facing_octant(FRAC_PI_2, FRAC_PI_2), 0);
        assert_eq!(facing_octant(0.0, FRAC_PI_2), 6);
    }
}

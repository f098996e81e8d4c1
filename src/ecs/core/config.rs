use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ecs::core::error::ConfigError;

/// Tunables for the simulation. Every field falls back to its default when
/// missing from the JSON file.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_hz: f32,
    /// Fall speed gained per airborne tick, scaled by the fixed timestep.
    pub gravity_scale: f32,
    /// Knockback speed per unit of knock factor, scaled by the fixed timestep.
    pub knock_scale: f32,
    /// Contacts whose normal is within this angle of up count as ground.
    pub max_ground_angle_deg: f32,
    pub move_speed: f32,
    pub ground_height: f32,
    /// Gravity factor above which an airborne actor switches to the Fall motion.
    pub fall_motion_threshold: u8,
    pub full_sync_interval_ticks: u64,
    pub animation_frame_ms: u32,
    pub prefab_manifest: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 30.0,
            gravity_scale: 300.0,
            knock_scale: 60.0,
            max_ground_angle_deg: 45.0,
            move_speed: 4.0,
            ground_height: 0.0,
            fall_motion_threshold: 6,
            full_sync_interval_ticks: 300,
            animation_frame_ms: 100,
            prefab_manifest: None,
        }
    }
}

impl SimulationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz > 0.0) {
            return Err(ConfigError::InvalidTickRate { tick_hz: self.tick_hz });
        }
        Ok(())
    }

    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_hz
    }

    /// Minimum `normal · up` for a contact to re-ground an actor.
    pub fn min_ground_dot(&self) -> f32 {
        self.max_ground_angle_deg.to_radians().cos()
    }
}

/// Per-tick context handed to the simulation systems instead of global state.
///
/// `is_full_tick` is owned by the host: prediction replays and interpolated
/// sub-steps set it to false so decaying counters do not advance twice.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub fixed_dt: f32,
    pub is_full_tick: bool,
    /// Camera yaw in radians, used to pick sprite directions.
    pub camera_yaw: f32,
}

impl TickContext {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            tick: 0,
            fixed_dt: config.fixed_dt(),
            is_full_tick: true,
            camera_yaw: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "tick_hz": 60.0, "move_speed": 7.5 }"#).unwrap();
        assert_eq!(config.tick_hz, 60.0);
        assert_eq!(config.move_speed, 7.5);
        assert_eq!(config.max_ground_angle_deg, 45.0);
        assert!(config.prefab_manifest.is_none());
    }

    #[test]
    fn ground_threshold_is_cos_of_angle() {
        let config = SimulationConfig::default();
        assert!((config.min_ground_dot() - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let config = SimulationConfig {
            tick_hz: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTickRate { .. })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimulationConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}

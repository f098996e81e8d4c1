use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading [`SimulationConfig`](crate::ecs::core::SimulationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file '{path}' is not valid JSON")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tick rate must be positive, got {tick_hz}")]
    InvalidTickRate { tick_hz: f32 },
}

/// Failures while loading a prefab manifest. Raised at startup only, never mid-tick.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not read prefab manifest '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("prefab manifest is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("prefab '{name}' has non-positive default mass {mass}")]
    InvalidMass { name: String, mass: f32 },

    #[error("prefab '{name}' is defined more than once")]
    Duplicate { name: String },
}

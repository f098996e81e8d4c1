pub mod components;
pub mod manifest;
pub mod plugin;
pub mod systems;

pub use components::*;
pub use manifest::{BodyPrefabDef, HeadPrefabDef, PrefabManifest};
pub use plugin::PrefabPlugin;

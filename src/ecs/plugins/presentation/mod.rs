pub mod components;
pub mod plugin;
pub mod systems;

pub use components::*;
pub use plugin::PresentationPlugin;

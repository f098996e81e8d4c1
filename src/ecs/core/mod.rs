pub mod bitfield;
pub mod config;
pub mod error;
pub mod kinds;
pub mod plugin;
pub mod state;
pub mod toggle;

pub use bitfield::{Field, PackedWords};
pub use config::{SimulationConfig, TickContext};
pub use error::{ConfigError, ManifestError};
pub use kinds::{BodyKind, ConfigTags, Flags, HeadKind, Motion, Teams};
pub use plugin::{CorePlugin, SimulationSet};
pub use state::{ChangedFields, CoreState, ShadowState};
pub use toggle::*;

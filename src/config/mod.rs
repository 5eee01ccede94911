pub mod traits;
pub mod evolution;
pub mod export;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use evolution::EvolutionConfig;
pub use export::ExportConfig;
pub use traits::{ConfigSection, FieldControl, FieldManifest, SectionManifest};

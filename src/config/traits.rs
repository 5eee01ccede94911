use crate::error::TreevolveError;
use serde::{Deserialize, Serialize};

/// One named block of the TOML config file. A section validates itself and
/// describes its tunable fields, so a settings panel can be generated
/// instead of hardcoding every knob in the front end.
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), TreevolveError>;
    fn manifest() -> SectionManifest;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

impl SectionManifest {
    pub fn field(&self, name: &str) -> Option<&FieldManifest> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub default: serde_json::Value,
    pub control: FieldControl,
    pub description: String,
}

/// How a settings panel renders a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldControl {
    /// Numeric range, inclusive on both ends.
    Slider { min: f64, max: f64 },
    Toggle,
    Text,
}

use super::traits::{ConfigSection, FieldControl, FieldManifest, SectionManifest};
use crate::error::TreevolveError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the evaluation JSON files are written to.
    pub output_dir: String,
    /// Store the full branch-segment lists for every generation, not just
    /// the first and last. Large files.
    pub save_branches: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "evaluations".to_string(),
            save_branches: false,
        }
    }
}

impl ConfigSection for ExportConfig {
    fn section_name() -> &'static str {
        "export"
    }

    fn validate(&self) -> Result<(), TreevolveError> {
        if self.output_dir.is_empty() {
            return Err(TreevolveError::Configuration(
                "Export output directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn manifest() -> SectionManifest {
        SectionManifest {
            section: Self::section_name().to_string(),
            fields: vec![
                FieldManifest {
                    name: "output_dir".to_string(),
                    default: serde_json::json!("evaluations"),
                    control: FieldControl::Text,
                    description: "Directory for evaluation JSON files".to_string(),
                },
                FieldManifest {
                    name: "save_branches".to_string(),
                    default: serde_json::json!(false),
                    control: FieldControl::Toggle,
                    description: "Store branch geometry for every generation".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_output_dir_is_rejected() {
        let config = ExportConfig {
            output_dir: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn manifest_renders_save_branches_as_a_toggle() {
        let manifest = ExportConfig::manifest();
        assert_eq!(manifest.section, "export");
        let field = manifest.field("save_branches").unwrap();
        assert_eq!(field.control, FieldControl::Toggle);
        assert_eq!(field.default, serde_json::json!(false));
    }
}

use super::{
    evolution::EvolutionConfig,
    export::ExportConfig,
    traits::{ConfigSection, SectionManifest},
};
use crate::error::TreevolveError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), TreevolveError> {
        self.evolution.validate()?;
        self.export.validate()?;
        Ok(())
    }

    /// Manifests of every section, in file order. Feeds the generated
    /// settings panel and the `settings` CLI command.
    pub fn manifest() -> Vec<SectionManifest> {
        vec![EvolutionConfig::manifest(), ExportConfig::manifest()]
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TreevolveError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TreevolveError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| TreevolveError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TreevolveError> {
        let config = self.config.read().unwrap();
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| TreevolveError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| TreevolveError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap().clone()
    }

    /// Apply a change and commit it only if the result validates; a failed
    /// validation leaves the installed config untouched.
    pub fn update<F>(&self, f: F) -> Result<(), TreevolveError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap();
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_rejects_invalid_changes() {
        let manager = ConfigManager::new();
        let result = manager.update(|config| {
            config.evolution.population_size = 0;
        });
        assert!(result.is_err());
        // The rejected change must not leak into the installed config.
        assert_eq!(manager.get().evolution.population_size, 10);
    }

    #[test]
    fn failed_update_preserves_earlier_valid_updates() {
        let manager = ConfigManager::new();
        manager
            .update(|config| config.evolution.population_size = 24)
            .unwrap();

        let result = manager.update(|config| {
            config.evolution.population_size = 50;
            config.evolution.mutation_rate = 2.0;
        });
        assert!(result.is_err());

        let config = manager.get();
        assert_eq!(config.evolution.population_size, 24);
        assert_eq!(config.evolution.mutation_rate, 0.01);
    }

    #[test]
    fn manifest_covers_every_section() {
        let sections: Vec<String> = AppConfig::manifest()
            .into_iter()
            .map(|m| m.section)
            .collect();
        assert_eq!(sections, ["evolution", "export"]);
    }

    #[test]
    fn toml_round_trip_preserves_sections() {
        let manager = ConfigManager::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("treevolve.toml");

        manager.save_to_file(&path).unwrap();
        manager.load_from_file(&path).unwrap();

        let config = manager.get();
        assert_eq!(config.evolution.population_size, 10);
        assert_eq!(config.export.output_dir, "evaluations");
    }
}

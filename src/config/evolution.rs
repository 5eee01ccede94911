use super::traits::{ConfigSection, FieldControl, FieldManifest, SectionManifest};
use crate::error::TreevolveError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Trees per generation; fixed for the whole run.
    pub population_size: usize,
    /// Grammar iterations applied to every fresh genome.
    pub iteration_target: u32,
    pub mutation_rate: f64,
    /// Weight assigned to freshly created or reset trees.
    pub default_weight: f64,
    /// Picks that trigger the next evolution cycle.
    pub required_picks: u32,
    /// Generations after which the run is considered finished.
    pub required_generations: u32,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            iteration_target: 3,
            mutation_rate: 0.01,
            default_weight: 0.01,
            required_picks: 3,
            required_generations: 10,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), TreevolveError> {
        if self.population_size < 2 {
            return Err(TreevolveError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TreevolveError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if self.default_weight <= 0.0 || self.default_weight >= 1.0 {
            return Err(TreevolveError::Configuration(
                "Default weight must be strictly between 0 and 1".to_string(),
            ));
        }
        if self.required_picks == 0 {
            return Err(TreevolveError::Configuration(
                "At least one pick is required per cycle".to_string(),
            ));
        }
        if self.required_picks as usize > self.population_size {
            return Err(TreevolveError::Configuration(
                "Required picks cannot exceed population size".to_string(),
            ));
        }
        Ok(())
    }

    fn manifest() -> SectionManifest {
        SectionManifest {
            section: Self::section_name().to_string(),
            fields: vec![
                FieldManifest {
                    name: "population_size".to_string(),
                    default: serde_json::json!(10),
                    control: FieldControl::Slider {
                        min: 2.0,
                        max: 100.0,
                    },
                    description: "Number of trees in a generation".to_string(),
                },
                FieldManifest {
                    name: "iteration_target".to_string(),
                    default: serde_json::json!(3),
                    control: FieldControl::Slider { min: 1.0, max: 6.0 },
                    description: "Grammar iterations per fresh genome".to_string(),
                },
                FieldManifest {
                    name: "mutation_rate".to_string(),
                    default: serde_json::json!(0.01),
                    control: FieldControl::Slider { min: 0.0, max: 1.0 },
                    description: "Per-symbol mutation probability".to_string(),
                },
                FieldManifest {
                    name: "default_weight".to_string(),
                    default: serde_json::json!(0.01),
                    control: FieldControl::Slider { min: 0.0, max: 1.0 },
                    description: "Selection weight of unpicked trees".to_string(),
                },
                FieldManifest {
                    name: "required_picks".to_string(),
                    default: serde_json::json!(3),
                    control: FieldControl::Slider {
                        min: 1.0,
                        max: 100.0,
                    },
                    description: "Picks that trigger an evolution cycle".to_string(),
                },
            ],
        }
    }
}

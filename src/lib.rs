//! Interactive genetic evolution of L-system trees.
//!
//! A grammar rewrites genome sentences into branching structures, a picker
//! (human through a UI, or simulated) weights the displayed trees, and
//! weighted selection with midpoint crossover and point mutation breeds each
//! next generation. An automated fitness score rates every tree for export
//! and analysis but never feeds back into selection.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigManager, EvolutionConfig, ExportConfig};
pub use data::{EvaluationStore, GenerationRecord, TreeRecord};
pub use engines::evaluation::{FitnessReport, TurtleConfig};
pub use engines::generation::{
    ConsoleProgressCallback, EvolutionEngine, Individual, Lsystem, Population, ProgressCallback,
};
pub use error::{Result, TreevolveError};

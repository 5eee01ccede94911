pub mod evolution_engine;
pub mod lsystem;
pub mod operators;
pub mod population;
pub mod presets;
pub mod progress;

pub use evolution_engine::EvolutionEngine;
pub use lsystem::{combine_alphabets, count_brackets, rewrite, Lsystem, RuleSet};
pub use operators::{crossover, mutate};
pub use population::{Individual, Population};
pub use presets::TreePreset;
pub use progress::{ConsoleProgressCallback, ProgressCallback, SilentProgressCallback};

pub mod export;
pub mod recalc;
pub mod store;

pub use export::{GenerationRecord, TreeRecord};
pub use store::{read_records, write_records, EvaluationStore};

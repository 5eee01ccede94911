use crate::engines::evaluation::fitness::FitnessReport;
use crate::engines::generation::lsystem::RuleSet;
use crate::types::BranchSegment;
use serde::{Deserialize, Serialize};

/// Saved snapshot of one tree: genome, final weight, geometry summary and
/// fitness breakdown. Field names are the wire format of the evaluation
/// files and must stay stable across versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeRecord {
    pub sentence: String,

    pub rules: RuleSet,

    pub alphabet: Vec<char>,

    #[serde(rename = "finalWeight")]
    pub final_weight: f64,

    #[serde(rename = "finalBranchCount")]
    pub final_branch_count: usize,

    /// Full branch geometry; only stored when branch saving is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<BranchSegment>>,

    pub fitness: FitnessReport,
}

/// Point-in-time snapshot of a whole generation. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    #[serde(rename = "genNumber")]
    pub gen_number: u32,

    #[serde(rename = "lsystemsData")]
    pub trees: Vec<TreeRecord>,
}

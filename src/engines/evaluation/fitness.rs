use crate::engines::generation::lsystem::count_brackets;
use crate::types::BranchSegment;
use serde::{Deserialize, Serialize};

// Weights of the individual marks in the overall score.
pub const PHOTOTROPISM_WEIGHT: f64 = 100.0;
pub const SYMMETRY_WEIGHT: f64 = 90.0;
pub const BRANCH_POINTS_WEIGHT: f64 = 30.0;

/// The branching-proportion mark has no access to a tree's configured
/// iteration count (saved records never stored it), so it assumes the
/// default of 3. Known limitation, kept for compatibility with existing
/// evaluation files.
pub const ASSUMED_ITERATIONS: f64 = 3.0;

/// Automated structural score for one tree. Diagnostic only: selection runs
/// on picker-assigned weights, never on this. Field names are the wire
/// format of the saved evaluation files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessReport {
    #[serde(rename = "treeName")]
    pub tree_name: String,

    /// Height proxy, `maxY / (maxY + 1)`, saturating toward 1.
    #[serde(rename = "positivePhototropism")]
    pub positive_phototropism: f64,

    /// Right-over-left branch-mass ratio clamped to `[-1, 1]`; `-1` marks a
    /// tree with all mass on one side.
    #[serde(rename = "bilateralSymmetry")]
    pub bilateral_symmetry: f64,

    #[serde(rename = "branchingPointsProportion")]
    pub branching_points_proportion: f64,

    #[serde(rename = "overallFitness")]
    pub overall_fitness: f64,
}

/// Score a tree from its rendered branches and its sentence. Pure.
pub fn mark_tree(tree_name: &str, branches: &[BranchSegment], sentence: &str) -> FitnessReport {
    let mut report = FitnessReport {
        tree_name: tree_name.to_string(),
        positive_phototropism: phototropism(branches),
        bilateral_symmetry: balance(branches),
        branching_points_proportion: branching_proportion(sentence),
        overall_fitness: 0.0,
    };
    report.overall_fitness = overall_fitness(&report);
    report
}

/// Highest branch endpoint mapped into `(0, 1)`; a tree with no branches
/// scores 0.
pub fn phototropism(branches: &[BranchSegment]) -> f64 {
    let Some(first) = branches.first() else {
        return 0.0;
    };

    let mut highest_y = first.start.y;
    for branch in branches {
        if branch.end.y > highest_y {
            highest_y = branch.end.y;
        }
    }

    phototropism_score(highest_y)
}

fn phototropism_score(highest_y: f64) -> f64 {
    highest_y / (highest_y + 1.0)
}

/// Left/right balance from the branch x-coordinates. Branch poses are in
/// the tree's local frame, so the centre line is x = 0. The emitted mark is
/// the ratio of right-side mass to left-side mass, clamped; keep the
/// direction stable, saved evaluation files depend on it.
pub fn balance(branches: &[BranchSegment]) -> f64 {
    let mut left = 0.0;
    let mut right = 0.0;

    for branch in branches {
        if branch.start.x < 0.0 || branch.end.x < 0.0 {
            left += branch.length();
        }
        if branch.start.x > 0.0 || branch.end.x > 0.0 {
            right += branch.length();
        }
    }

    balance_ratio_score(left, right)
}

fn balance_ratio_score(left: f64, right: f64) -> f64 {
    // All mass on one side means the tree is maximally unbalanced.
    if left == 0.0 || right == 0.0 {
        return -1.0;
    }

    (right / left).clamp(-1.0, 1.0)
}

/// Branching-point density of the sentence: every `[` starts a branch.
pub fn branching_proportion(sentence: &str) -> f64 {
    let (opens, _) = count_brackets(sentence);
    branching_points_score(opens as f64, ASSUMED_ITERATIONS)
}

fn branching_points_score(branch_points: f64, iterations: f64) -> f64 {
    branch_points / (branch_points + iterations.powi(3))
}

/// Weighted mean of the marks. Symmetry enters as `1 - |balance|` since the
/// balance mark carries the leaning direction in its sign.
pub fn overall_fitness(report: &FitnessReport) -> f64 {
    let combined_weights = PHOTOTROPISM_WEIGHT + SYMMETRY_WEIGHT + BRANCH_POINTS_WEIGHT;

    let symmetry_fitness = 1.0 - report.bilateral_symmetry.abs();

    let weighted = report.positive_phototropism * PHOTOTROPISM_WEIGHT
        + symmetry_fitness * SYMMETRY_WEIGHT
        + report.branching_points_proportion * BRANCH_POINTS_WEIGHT;

    weighted / combined_weights
}

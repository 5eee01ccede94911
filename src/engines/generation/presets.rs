use super::lsystem::{Lsystem, RuleSet, CLOSE_BRACKET, OPEN_BRACKET};
use rand::Rng;

/// Starting shapes for generation 0. Each preset pairs an axiom with the
/// branching angle its rules were tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreePreset {
    FractalPlant,
    WideBush,
    NarrowBush,
    DoubleTrunk,
}

impl TreePreset {
    pub const ALL: [TreePreset; 4] = [
        TreePreset::FractalPlant,
        TreePreset::WideBush,
        TreePreset::NarrowBush,
        TreePreset::DoubleTrunk,
    ];

    pub fn axiom(self) -> &'static str {
        match self {
            TreePreset::FractalPlant => "X",
            TreePreset::WideBush => "G",
            TreePreset::NarrowBush => "G",
            TreePreset::DoubleTrunk => "Y",
        }
    }

    /// Branching angle in degrees used by the turtle for this preset.
    pub fn angle(self) -> f64 {
        match self {
            TreePreset::FractalPlant => 35.0,
            TreePreset::WideBush => 25.0,
            TreePreset::NarrowBush => 20.0,
            TreePreset::DoubleTrunk => 22.5,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// The shared rule pool every starting tree draws from. Crossover later
/// merges rule sets, so all presets carry the full pool from the start.
pub fn base_ruleset() -> RuleSet {
    let mut rules = RuleSet::new();
    rules.insert('F', "FF".to_string());
    rules.insert('X', "F[+X][-X]FX".to_string());
    rules.insert('G', "G[+G]G[-G]G".to_string());
    rules.insert('H', "H[+H]H[-H]H".to_string());
    rules.insert('Y', "HH".to_string());
    rules
}

/// Alphabet for a rule set: the turtle's core symbols plus every rule head.
pub fn alphabet_for(rules: &RuleSet) -> Vec<char> {
    let mut symbols = vec!['+', '-', OPEN_BRACKET, CLOSE_BRACKET, 'F'];

    for symbol in rules.keys() {
        if !symbols.contains(symbol) {
            symbols.push(*symbol);
        }
    }

    symbols
}

/// Build a fresh, un-iterated genome from a random preset.
pub fn random_genome<R: Rng>(rng: &mut R, iteration_target: u32) -> (Lsystem, TreePreset) {
    let preset = TreePreset::random(rng);
    let rules = base_ruleset();
    let alphabet = alphabet_for(&rules);

    (
        Lsystem::new(preset.axiom(), alphabet, rules, iteration_target),
        preset,
    )
}

use crate::error::{Result, TreevolveError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rewrite rules: symbol -> replacement string.
///
/// Symbols without an entry rewrite to themselves, so iteration is total
/// over any sentence.
pub type RuleSet = BTreeMap<char, String>;

pub const OPEN_BRACKET: char = '[';
pub const CLOSE_BRACKET: char = ']';

pub fn is_bracket(symbol: char) -> bool {
    symbol == OPEN_BRACKET || symbol == CLOSE_BRACKET
}

/// Genome representation for the grammatical evolution.
///
/// A genome is an L-system: an axiom rewritten into a `sentence` over an
/// `alphabet` by repeated application of `rules`. The sentence string is the
/// substrate the genetic operators work on:
/// - **Crossover**: splicing two sentence strings is trivial
/// - **Mutation**: substituting single symbols is straightforward
/// - **Interpretation**: the turtle reads the sentence as drawing commands
///
/// Brackets `[` / `]` delimit branch scopes and are structural: operators
/// must never substitute them, and an unbalanced surplus of opens is closed
/// by [`Lsystem::repair_balance`] before traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lsystem {
    pub sentence: String,
    pub alphabet: Vec<char>,
    pub rules: RuleSet,
    pub iteration_target: u32,
    pub iterations_done: u32,
    pub fully_iterated: bool,
}

impl Lsystem {
    pub fn new(axiom: &str, alphabet: Vec<char>, rules: RuleSet, iteration_target: u32) -> Self {
        Self {
            sentence: axiom.to_string(),
            alphabet,
            rules,
            iteration_target,
            iterations_done: 0,
            fully_iterated: iteration_target == 0,
        }
    }

    /// Apply `rewrite` until the iteration target is reached. No-op once the
    /// genome is fully iterated; partial progress resumes where it left off.
    pub fn iterate_to_target(&mut self) {
        if self.fully_iterated {
            return;
        }

        while self.iterations_done < self.iteration_target {
            self.sentence = rewrite(&self.sentence, &self.rules);
            self.iterations_done += 1;
        }

        self.fully_iterated = true;
    }

    /// Append closing brackets for every unmatched open in the current
    /// sentence. Unmatched extra closers are left alone: rule expansions only
    /// produce closers together with opens, so the surplus is always on the
    /// open side. Returns how many closers were appended.
    pub fn repair_balance(&mut self) -> usize {
        let (opens, closes) = count_brackets(&self.sentence);

        if opens <= closes {
            return 0;
        }

        let extra = opens - closes;
        log::debug!("unclosed branch scopes before repair: {}", extra);

        for _ in 0..extra {
            self.sentence.push(CLOSE_BRACKET);
        }

        extra
    }

    /// Non-bracket symbols of the alphabet, the candidate pool for mutation.
    pub fn letter_symbols(&self) -> Vec<char> {
        self.alphabet
            .iter()
            .copied()
            .filter(|&c| !is_bracket(c))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.sentence.is_empty() {
            return Err(TreevolveError::Grammar("empty sentence".to_string()));
        }
        if self.alphabet.is_empty() {
            return Err(TreevolveError::Grammar("empty alphabet".to_string()));
        }
        Ok(())
    }
}

/// One grammar generation step: every symbol with a rule is replaced by the
/// rule body, everything else is carried over unchanged. Pure.
pub fn rewrite(sentence: &str, rules: &RuleSet) -> String {
    let mut next = String::with_capacity(sentence.len() * 2);

    for c in sentence.chars() {
        match rules.get(&c) {
            Some(replacement) => next.push_str(replacement),
            None => next.push(c),
        }
    }

    next
}

/// Count `[` and `]` occurrences, returned as (opens, closes).
pub fn count_brackets(sentence: &str) -> (usize, usize) {
    let mut opens = 0;
    let mut closes = 0;

    for c in sentence.chars() {
        if c == OPEN_BRACKET {
            opens += 1;
        } else if c == CLOSE_BRACKET {
            closes += 1;
        }
    }

    (opens, closes)
}

/// Set union of two alphabets, keeping the first alphabet's order and
/// appending symbols unique to the second in the second's order.
pub fn combine_alphabets(a: &[char], b: &[char]) -> Vec<char> {
    let mut combined = a.to_vec();

    for &symbol in b {
        if !combined.contains(&symbol) {
            combined.push(symbol);
        }
    }

    combined
}

/// Union of two rule sets; on a shared key the first parent's rule wins.
pub fn combine_rules(a: &RuleSet, b: &RuleSet) -> RuleSet {
    let mut combined = a.clone();

    for (symbol, replacement) in b {
        combined
            .entry(*symbol)
            .or_insert_with(|| replacement.clone());
    }

    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fractal_rules() -> RuleSet {
        let mut rules = RuleSet::new();
        rules.insert('F', "FF".to_string());
        rules.insert('X', "F[+X][-X]FX".to_string());
        rules
    }

    #[test]
    fn rewrite_replaces_mapped_symbols_only() {
        let rules = fractal_rules();
        assert_eq!(rewrite("X", &rules), "F[+X][-X]FX");
        assert_eq!(rewrite("+-[]", &rules), "+-[]");
    }

    #[test]
    fn rewrite_is_stable_without_matching_rules() {
        let rules = fractal_rules();
        let sentence = "+[-]+";
        assert_eq!(rewrite(sentence, &rules), sentence);
        assert_eq!(rewrite(&rewrite(sentence, &rules), &rules), sentence);
    }

    #[test]
    fn two_iterations_expand_to_expected_literal() {
        let mut genome = Lsystem::new("X", vec!['F', 'X', '+', '-', '[', ']'], fractal_rules(), 1);
        genome.iterate_to_target();
        assert_eq!(genome.sentence, "F[+X][-X]FX");
        assert!(genome.fully_iterated);

        let second = rewrite(&genome.sentence, &genome.rules);
        assert_eq!(second, "FF[+F[+X][-X]FX][-F[+X][-X]FX]FFF[+X][-X]FX");
    }

    #[test]
    fn iterate_is_noop_once_fully_iterated() {
        let mut genome = Lsystem::new("X", vec!['F', 'X'], fractal_rules(), 1);
        genome.iterate_to_target();
        let frozen = genome.sentence.clone();
        genome.iterate_to_target();
        assert_eq!(genome.sentence, frozen);
        assert_eq!(genome.iterations_done, 1);
    }

    #[test]
    fn count_brackets_sees_every_bracket() {
        let sentence = "F[+F][-F[+F]]";
        let (opens, closes) = count_brackets(sentence);
        assert_eq!(opens, 3);
        assert_eq!(closes, 3);
        let bracket_chars = sentence.chars().filter(|&c| is_bracket(c)).count();
        assert_eq!(opens + closes, bracket_chars);
    }

    #[test]
    fn repair_appends_missing_closers() {
        let mut genome = Lsystem::new("F[+F[-F", vec!['F', '+', '-', '[', ']'], RuleSet::new(), 0);
        let appended = genome.repair_balance();
        assert_eq!(appended, 2);
        assert_eq!(genome.sentence, "F[+F[-F]]");
        let (opens, closes) = count_brackets(&genome.sentence);
        assert_eq!(opens, closes);
    }

    #[test]
    fn repair_ignores_excess_closers() {
        let mut genome = Lsystem::new("F]F]", vec!['F', '[', ']'], RuleSet::new(), 0);
        let appended = genome.repair_balance();
        assert_eq!(appended, 0);
        assert_eq!(genome.sentence, "F]F]");
    }

    #[test]
    fn combine_alphabets_preserves_order() {
        let a = vec!['+', '-', '[', ']', 'F', 'X'];
        let b = vec!['+', 'G', 'F', 'H'];
        assert_eq!(
            combine_alphabets(&a, &b),
            vec!['+', '-', '[', ']', 'F', 'X', 'G', 'H']
        );
    }
}

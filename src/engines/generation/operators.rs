use super::lsystem::{combine_alphabets, combine_rules, is_bracket, Lsystem};
use crate::error::{Result, TreevolveError};
use rand::Rng;

/// Midpoint crossover: head of `parent_a` up to a random cut, tail of
/// `parent_b` from its own random cut. Cut points are drawn from
/// `[0, len - 1)` so a parent never contributes via a cut at its very end;
/// a length-1 sentence pins the cut to 0.
///
/// The child gets the combined alphabet and rule set of both parents and
/// inherits `parent_a`'s iteration state. Bracket balance is not repaired
/// here; callers run `repair_balance` before handing the child to a
/// traversal.
pub fn crossover<R: Rng>(parent_a: &Lsystem, parent_b: &Lsystem, rng: &mut R) -> Result<Lsystem> {
    parent_a.validate().map_err(|e| {
        TreevolveError::Operator(format!("crossover parent A invalid: {}", e))
    })?;
    parent_b.validate().map_err(|e| {
        TreevolveError::Operator(format!("crossover parent B invalid: {}", e))
    })?;

    let chars_a: Vec<char> = parent_a.sentence.chars().collect();
    let chars_b: Vec<char> = parent_b.sentence.chars().collect();

    let cut_a = draw_cut_point(chars_a.len(), rng);
    let cut_b = draw_cut_point(chars_b.len(), rng);

    let mut child_sentence = String::with_capacity(cut_a + chars_b.len() - cut_b);
    child_sentence.extend(&chars_a[..cut_a]);
    child_sentence.extend(&chars_b[cut_b..]);

    Ok(Lsystem {
        sentence: child_sentence,
        alphabet: combine_alphabets(&parent_a.alphabet, &parent_b.alphabet),
        rules: combine_rules(&parent_a.rules, &parent_b.rules),
        iteration_target: parent_a.iteration_target,
        iterations_done: parent_a.iterations_done,
        fully_iterated: parent_a.fully_iterated,
    })
}

fn draw_cut_point<R: Rng>(len: usize, rng: &mut R) -> usize {
    if len < 2 {
        0
    } else {
        rng.gen_range(0..len - 1)
    }
}

/// Point mutation: every position independently mutates with probability
/// `mutation_rate` into a random non-bracket symbol of the genome's own
/// alphabet. Bracket positions are never touched so branch scopes survive
/// mutation untouched (balance is a separate concern).
pub fn mutate<R: Rng>(genome: &mut Lsystem, mutation_rate: f64, rng: &mut R) -> Result<()> {
    if !(0.0..=1.0).contains(&mutation_rate) {
        return Err(TreevolveError::Operator(format!(
            "mutation rate {} outside [0, 1]",
            mutation_rate
        )));
    }

    if mutation_rate == 0.0 {
        return Ok(());
    }

    let letters = genome.letter_symbols();
    if letters.is_empty() {
        return Err(TreevolveError::Operator(
            "alphabet has no non-bracket symbols to mutate into".to_string(),
        ));
    }

    let mut mutated: Vec<char> = genome.sentence.chars().collect();

    for slot in mutated.iter_mut() {
        if rng.gen::<f64>() < mutation_rate && !is_bracket(*slot) {
            *slot = letters[rng.gen_range(0..letters.len())];
        }
    }

    genome.sentence = mutated.into_iter().collect();
    Ok(())
}

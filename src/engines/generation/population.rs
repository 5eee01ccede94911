use super::lsystem::Lsystem;
use crate::error::{Result, TreevolveError};
use crate::types::BranchSegment;
use rand::Rng;

/// Tolerance for the "weights already sum to 1" check. Strict float
/// equality here caused spurious renormalization in earlier versions.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// One candidate tree in a population: a genome plus the bookkeeping the
/// selection engine needs. Individuals are owned exclusively by their
/// population; pick events reach them only through
/// [`Population::record_pick`].
#[derive(Debug, Clone)]
pub struct Individual {
    pub lsystem: Lsystem,
    /// Selection weight, driven by pick events. Always non-negative.
    pub weight: f64,
    /// Generation this individual was created in; set once.
    pub generation_number: u32,
    /// Stable opaque id for logging and pick routing.
    pub identity: String,
    /// Branch angle in degrees the turtle uses for this tree, inherited
    /// from the starting preset.
    pub angle_degrees: f64,
    /// Branch geometry produced by the turtle, consumed read-only by the
    /// fitness module. Empty until the individual is rendered.
    pub branches: Vec<BranchSegment>,
}

impl Individual {
    pub fn new(lsystem: Lsystem, weight: f64, generation_number: u32, identity: String) -> Self {
        Self {
            lsystem,
            weight,
            generation_number,
            identity,
            angle_degrees: 25.0,
            branches: Vec::new(),
        }
    }

    pub fn with_angle(mut self, angle_degrees: f64) -> Self {
        self.angle_degrees = angle_degrees;
        self
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }
}

/// One generation's snapshot: a fixed-size set of individuals plus pick
/// bookkeeping. Generations are replaced, never renumbered in place: a new
/// population takes ownership of the bred children and the old one is
/// dropped.
#[derive(Debug)]
pub struct Population {
    generation_number: u32,
    pub members: Vec<Individual>,
    pub default_weight: f64,
    pick_count: u32,
}

impl Population {
    pub fn new(generation_number: u32, members: Vec<Individual>, default_weight: f64) -> Self {
        Self {
            generation_number,
            members,
            default_weight,
            pick_count: 0,
        }
    }

    /// Replace `previous` with a new generation holding `children`.
    /// Configuration carries over, the generation number advances by one and
    /// the pick counter resets.
    pub fn next_generation(previous: &Population, children: Vec<Individual>) -> Self {
        log::info!(
            "new population initialized, generation {}, tree count: {}",
            previous.generation_number + 1,
            children.len()
        );

        Self {
            generation_number: previous.generation_number + 1,
            members: children,
            default_weight: previous.default_weight,
            pick_count: 0,
        }
    }

    pub fn generation_number(&self) -> u32 {
        self.generation_number
    }

    pub fn pick_count(&self) -> u32 {
        self.pick_count
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn member_by_identity(&self, identity: &str) -> Option<&Individual> {
        self.members.iter().find(|m| m.identity == identity)
    }

    /// Route a pick or unpick event to the member with the given identity
    /// and return its new weight.
    ///
    /// A pick raises the weight to `1 - default_weight^(1 / (2 * picks))`:
    /// the first pick of a cycle lands highest and each following pick lands
    /// a little lower. The exact curve is a tuned heuristic; keep it
    /// bit-compatible with the saved evaluation data. An unpick resets the
    /// weight to the default.
    pub fn record_pick(&mut self, identity: &str, selected: bool) -> Result<f64> {
        let default_weight = self.default_weight;

        let member_index = self
            .members
            .iter()
            .position(|m| m.identity == identity)
            .ok_or_else(|| {
                TreevolveError::Population(format!("no member with identity {}", identity))
            })?;

        let new_weight = if selected {
            self.pick_count += 1;
            1.0 - default_weight.powf(1.0 / (2.0 * f64::from(self.pick_count)))
        } else {
            self.pick_count = self.pick_count.saturating_sub(1);
            default_weight
        };

        self.members[member_index].weight = new_weight;
        log::debug!(
            "{} tree {}, new weight {}",
            if selected { "picked" } else { "unpicked" },
            identity,
            new_weight
        );

        Ok(new_weight)
    }

    pub fn reset_pick_count(&mut self) {
        self.pick_count = 0;
    }

    fn weight_sum(&self) -> f64 {
        self.members.iter().map(|m| m.weight).sum()
    }

    pub fn weights_normalized(&self) -> bool {
        (self.weight_sum() - 1.0).abs() <= WEIGHT_EPSILON
    }

    /// Scale all member weights so they sum to 1. An all-zero weight vector
    /// cannot be normalized and is a selection error.
    pub fn normalize_weights(&mut self) -> Result<()> {
        let sum = self.weight_sum();

        if sum <= 0.0 {
            return Err(TreevolveError::Selection(
                "cannot normalize: weight sum is zero".to_string(),
            ));
        }

        log::debug!("weight sum before normalizing: {}", sum);

        let scale = 1.0 / sum;
        for member in &mut self.members {
            member.weight *= scale;
        }

        Ok(())
    }

    /// Weighted random draw over the members: roll in `[0, 1)`, walk the
    /// members in population order accumulating weight, return the first
    /// member whose cumulative weight exceeds the roll.
    ///
    /// Float accumulation can leave the final cumulative sum a hair under
    /// the roll; that miss is recoverable and falls back to the last member,
    /// logged rather than silently swallowed.
    pub fn pick_random_weighted<R: Rng>(&mut self, rng: &mut R) -> Result<usize> {
        if self.members.is_empty() {
            return Err(TreevolveError::Selection(
                "cannot pick from an empty population".to_string(),
            ));
        }

        if !self.weights_normalized() {
            self.normalize_weights()?;
        }

        let roll: f64 = rng.gen();
        let mut cumulative = 0.0;

        for (index, member) in self.members.iter().enumerate() {
            cumulative += member.weight;
            if roll < cumulative {
                return Ok(index);
            }
        }

        log::warn!(
            "weighted pick rolled {} past cumulative {}, falling back to last member",
            roll,
            cumulative
        );
        Ok(self.members.len() - 1)
    }

    /// Select `count` parent indices for the next generation.
    ///
    /// The single lowest-weight member is always taken first: after a weight
    /// reset the least-disturbed tree carries the default weight, so this is
    /// an elitism heuristic on picker behavior, not a fitness rank. The rest
    /// are weighted draws with replacement, so the same member may appear
    /// more than once. Every selected parent's weight is then reset to the
    /// default so re-selection cannot compound across generations.
    pub fn selection<R: Rng>(&mut self, count: usize, rng: &mut R) -> Result<Vec<usize>> {
        if self.members.is_empty() {
            return Err(TreevolveError::Selection(
                "cannot select parents from an empty population".to_string(),
            ));
        }
        if count == 0 {
            return Err(TreevolveError::Selection(
                "parent count must be at least 1".to_string(),
            ));
        }

        let mut parents = Vec::with_capacity(count);

        let elite = self
            .members
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.weight
                    .partial_cmp(&b.weight)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(index, _)| index)
            .ok_or_else(|| TreevolveError::Selection("no elite candidate".to_string()))?;
        parents.push(elite);

        self.normalize_weights()?;

        for _ in 1..count {
            parents.push(self.pick_random_weighted(rng)?);
        }

        let default_weight = self.default_weight;
        for &index in &parents {
            self.members[index].weight = default_weight;
        }

        Ok(parents)
    }
}

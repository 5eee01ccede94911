use super::lsystem::Lsystem;
use super::operators::{crossover, mutate};
use super::population::{Individual, Population};
use super::presets::{random_genome, TreePreset};
use super::progress::ProgressCallback;
use crate::config::EvolutionConfig;
use crate::data::export::{GenerationRecord, TreeRecord};
use crate::data::EvaluationStore;
use crate::engines::evaluation::fitness;
use crate::engines::evaluation::turtle::{self, TurtleConfig};
use crate::error::{Result, TreevolveError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BRANCH_STEP: f64 = 2.0;

/// Drives the interactive evolution: owns the RNG and the configuration,
/// turns pick-weighted populations into bred successors. The picker itself
/// (human or simulated) lives outside; it talks to the engine through
/// [`Population::record_pick`] and the methods here.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: StdRng,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        use crate::config::traits::ConfigSection;
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Generation 0: fresh genomes from random starting presets.
    pub fn init_population(&mut self) -> Population {
        let mut members = Vec::with_capacity(self.config.population_size);

        for index in 0..self.config.population_size {
            let (lsystem, preset) = random_genome(&mut self.rng, self.config.iteration_target);
            members.push(
                Individual::new(
                    lsystem,
                    self.config.default_weight,
                    0,
                    identity(0, index),
                )
                .with_angle(preset.angle()),
            );
        }

        Population::new(0, members, self.config.default_weight)
    }

    /// Rewrite every genome up to its iteration target.
    pub fn grow_all(&self, population: &mut Population) {
        for member in &mut population.members {
            member.lsystem.iterate_to_target();
        }
    }

    /// Run the turtle for every member and store the resulting branch
    /// geometry on the individual.
    pub fn render_all(&self, population: &mut Population) {
        for member in &mut population.members {
            let config = TurtleConfig::default()
                .with_angle(member.angle_degrees)
                .with_step(BRANCH_STEP);
            member.branches = turtle::interpret(&member.lsystem.sentence, &config);
        }
    }

    pub fn ready_to_evolve(&self, population: &Population) -> bool {
        population.pick_count() >= self.config.required_picks
    }

    /// One full reproduction cycle: weighted parent selection, midpoint
    /// crossover of random parent pairs, point mutation, bracket repair.
    /// Returns the replacement population with the generation number
    /// advanced; the previous population is left behind for the caller to
    /// discard.
    pub fn evolve_generation(&mut self, population: &mut Population) -> Result<Population> {
        let size = self.config.population_size;
        if population.size() != size {
            return Err(TreevolveError::Population(format!(
                "population holds {} members, configured size is {}",
                population.size(),
                size
            )));
        }

        let parents = population.selection(size, &mut self.rng)?;
        let next_generation = population.generation_number() + 1;

        let mut children = Vec::with_capacity(size);
        for index in 0..size {
            let parent_a = &population.members[parents[self.rng.gen_range(0..parents.len())]];
            let parent_b = &population.members[parents[self.rng.gen_range(0..parents.len())]];

            let child = self.breed(&parent_a.lsystem, &parent_b.lsystem)?;

            children.push(
                Individual::new(
                    child,
                    self.config.default_weight,
                    next_generation,
                    identity(next_generation, index),
                )
                .with_angle(TreePreset::random(&mut self.rng).angle()),
            );
        }

        Ok(Population::next_generation(population, children))
    }

    fn breed(&mut self, parent_a: &Lsystem, parent_b: &Lsystem) -> Result<Lsystem> {
        let mut child = crossover(parent_a, parent_b, &mut self.rng)?;
        mutate(&mut child, self.config.mutation_rate, &mut self.rng)?;
        child.repair_balance();
        Ok(child)
    }

    /// Snapshot a population for persistence, scoring every tree.
    pub fn export_generation(
        &self,
        population: &Population,
        include_branches: bool,
    ) -> GenerationRecord {
        let trees = population
            .members
            .iter()
            .map(|member| TreeRecord {
                sentence: member.lsystem.sentence.clone(),
                rules: member.lsystem.rules.clone(),
                alphabet: member.lsystem.alphabet.clone(),
                final_weight: member.weight,
                final_branch_count: member.branch_count(),
                branches: include_branches.then(|| member.branches.clone()),
                fitness: fitness::mark_tree(
                    &member.identity,
                    &member.branches,
                    &member.lsystem.sentence,
                ),
            })
            .collect();

        GenerationRecord {
            gen_number: population.generation_number(),
            trees,
        }
    }

    /// Full simulated session: grow and render each generation, let `picker`
    /// choose trees until the pick threshold trips, evolve, and snapshot
    /// every generation into `store`. Branch geometry is stored for the
    /// first and final generation; `save_branches` keeps it for every
    /// generation in between as well.
    ///
    /// `picker` receives the current population and returns the identities
    /// to pick this round; a UI driver would instead call `record_pick` from
    /// its event loop and use the step methods directly.
    pub fn run<C, F>(
        &mut self,
        picker: F,
        store: &mut EvaluationStore,
        callback: &mut C,
        save_branches: bool,
    ) -> Result<Population>
    where
        C: ProgressCallback,
        F: Fn(&Population, &mut StdRng) -> Vec<String>,
    {
        let mut population = self.init_population();

        loop {
            callback.on_generation_start(population.generation_number());

            self.grow_all(&mut population);
            self.render_all(&mut population);

            if population.generation_number() >= self.config.required_generations {
                let record = self.export_generation(&population, true);
                callback.on_generation_complete(
                    population.generation_number(),
                    best_fitness(&record),
                );
                store.add(record);
                return Ok(population);
            }

            for identity in picker(&population, &mut self.rng) {
                population.record_pick(&identity, true)?;
            }

            if !self.ready_to_evolve(&population) {
                return Err(TreevolveError::Selection(format!(
                    "picker supplied {} picks, {} required",
                    population.pick_count(),
                    self.config.required_picks
                )));
            }

            let include_branches = save_branches || population.generation_number() == 0;
            let record = self.export_generation(&population, include_branches);
            callback
                .on_generation_complete(population.generation_number(), best_fitness(&record));
            store.add(record);

            population = self.evolve_generation(&mut population)?;
        }
    }
}

fn identity(generation: u32, index: usize) -> String {
    format!("g{}_t{}", generation, index)
}

fn best_fitness(record: &GenerationRecord) -> f64 {
    record
        .trees
        .iter()
        .map(|t| t.fitness.overall_fitness)
        .fold(f64::MIN, f64::max)
}

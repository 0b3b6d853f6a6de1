//! Generation-level GA operations.
//!
//! [`GeneticAlgorithm`] holds the run parameters, the item catalog and the
//! generation history, and exposes each stage of a generation as a separate
//! operation. Stages never modify their input population; each returns a
//! new [`Population`]. [`GaRunner`](super::GaRunner) composes them into the
//! full loop.

use rand::Rng;

use super::config::GaConfig;
use super::history::GenerationHistory;
use super::operators;
use super::population::Population;
use super::selection;
use super::types::Individual;
use crate::catalog::Catalog;
use crate::error::{GaError, Result};

/// Number of leading members compared by the fitness stability check.
pub const STABILITY_WINDOW: usize = 10;

/// The knapsack GA engine.
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    config: GaConfig,
    catalog: Catalog,
    history: GenerationHistory,
}

impl GeneticAlgorithm {
    /// Creates an engine after validating `config` and `catalog`.
    pub fn new(config: GaConfig, catalog: Catalog) -> Result<Self> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(GaError::EmptyCatalog);
        }
        let history = GenerationHistory::with_capacity(config.max_generations);
        Ok(Self {
            config,
            catalog,
            history,
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Chromosome length: one gene per catalog item.
    pub fn num_items(&self) -> usize {
        self.catalog.len()
    }

    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    pub(crate) fn into_history(self) -> GenerationHistory {
        self.history
    }

    /// Creates the evaluated initial population.
    pub fn init_population<R: Rng>(&self, rng: &mut R) -> Population {
        Population::random(
            self.config.population_size,
            self.num_items(),
            self.config.knapsack_capacity,
            &self.catalog,
            rng,
        )
    }

    /// Refreshes volume, then fitness, then normalized fitness.
    pub fn evaluate(&self, population: &mut Population) {
        population.recompute_volume(&self.catalog);
        population.recompute_fitness(&self.catalog);
        population.recompute_normalized_fitness();
    }

    /// Termination test for the loop driving generation `generation`.
    ///
    /// True once the generation budget is used up, or when the first
    /// [`STABILITY_WINDOW`] members in storage order share one fitness
    /// value. Populations smaller than the window only stop on the budget.
    pub fn is_converged(&self, generation: usize, population: &Population) -> bool {
        generation + 1 >= self.config.max_generations || is_fitness_stable(population)
    }

    /// Fitness-proportionate selection of a whole intermediate population.
    pub fn select_population_by_roulette_wheel<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Population {
        selection::roulette_wheel(population, rng)
    }

    /// Second-parent selection: the best member of a shuffled copy of the
    /// whole population.
    pub fn select_parent_by_tournament<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Individual {
        selection::tournament(population, rng)
    }

    /// Applies two-point crossover to the population in ranked order.
    ///
    /// The output holds one member per rank of the input. Ranks below
    /// `elitism_count` are copied unchanged. Every other rank is replaced,
    /// with probability `crossover_rate`, by an unevaluated offspring of the
    /// ranked member and a tournament-selected partner; otherwise it is
    /// copied unchanged.
    pub fn crossover_population<R: Rng>(&self, population: &Population, rng: &mut R) -> Population {
        let capacity = self.config.knapsack_capacity;
        let mut next = Vec::with_capacity(population.size());

        for (rank, parent1) in population.ranked().into_iter().enumerate() {
            if rank < self.config.elitism_count
                || rng.random_range(0.0..1.0) >= self.config.crossover_rate
            {
                next.push(parent1.clone());
                continue;
            }

            let parent2 = self.select_parent_by_tournament(population, rng);
            let cut = operators::draw_cut_points(parent1.chromosome_length(), rng);
            log::trace!("rank {rank}: two-point crossover at {cut:?}");
            let genes = operators::two_point_crossover(parent1.chromosome(), parent2.chromosome(), cut);
            next.push(Individual::from_chromosome(genes, capacity));
        }

        Population::from_individuals(next, capacity)
    }

    /// Applies bit-flip mutation to the population in ranked order.
    ///
    /// Ranks `0..=elitism_count` are copied unchanged; one rank more than
    /// crossover protects. Every other member is copied and each of its
    /// genes flips with probability `mutation_rate`. Cached fitness and
    /// volume of mutated copies are stale until [`evaluate`](Self::evaluate).
    pub fn mutate_population<R: Rng>(&self, population: &Population, rng: &mut R) -> Population {
        let mut next = Vec::with_capacity(population.size());

        for (rank, ind) in population.ranked().into_iter().enumerate() {
            let mut child = ind.clone();
            if rank > self.config.elitism_count {
                operators::bit_flip_mutation(child.genes_mut(), self.config.mutation_rate, rng);
            }
            next.push(child);
        }

        Population::from_individuals(next, self.config.knapsack_capacity)
    }

    /// One full generation: select, crossover, mutate, evaluate.
    pub fn step<R: Rng>(&self, population: &Population, rng: &mut R) -> Population {
        let selected = self.select_population_by_roulette_wheel(population, rng);
        let crossed = self.crossover_population(&selected, rng);
        let mut next = self.mutate_population(&crossed, rng);
        self.evaluate(&mut next);
        next
    }

    /// Stores `population` as generation `index`.
    ///
    /// # Panics
    /// Panics if `index` is outside the generation budget or already recorded.
    pub fn record_generation(&mut self, index: usize, population: Population) {
        self.history.record(index, population);
    }

    /// The population recorded for generation `index`, if any.
    pub fn generation(&self, index: usize) -> Option<&Population> {
        self.history.get(index)
    }
}

/// Whether the first [`STABILITY_WINDOW`] members in storage order all have
/// the same fitness. Always false for smaller populations.
pub fn is_fitness_stable(population: &Population) -> bool {
    let members = population.individuals();
    if members.len() < STABILITY_WINDOW {
        return false;
    }
    let first = members[0].fitness();
    members[1..STABILITY_WINDOW]
        .iter()
        .all(|ind| ind.fitness() == first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn engine(config: GaConfig, num_items: usize, seed: u64) -> GeneticAlgorithm {
        let mut rng = create_rng(seed);
        let catalog = Catalog::random(num_items, &mut rng);
        GeneticAlgorithm::new(config, catalog).expect("valid test config")
    }

    /// Population whose member i has fitness `values[i]` (member i packs
    /// only item i of benefit `values[i]`).
    fn with_fitness(values: &[u32]) -> (GeneticAlgorithm, Population) {
        let n = values.len();
        let catalog = Catalog::from(values.iter().map(|&v| (1, v)).collect::<Vec<_>>());
        let config = GaConfig::default()
            .with_population_size(n)
            .with_knapsack_capacity(1);
        let ga = GeneticAlgorithm::new(config, catalog).expect("valid test config");
        let individuals = (0..n)
            .map(|i| {
                let mut genes = vec![false; n];
                genes[i] = true;
                Individual::from_chromosome(genes, 1)
            })
            .collect();
        let mut pop = Population::from_individuals(individuals, 1);
        ga.evaluate(&mut pop);
        (ga, pop)
    }

    #[test]
    fn test_new_validates() {
        let catalog = Catalog::from(vec![(1, 1)]);
        let bad = GaConfig::default().with_population_size(0);
        assert_eq!(
            GeneticAlgorithm::new(bad, catalog.clone()).err(),
            Some(GaError::EmptyPopulation)
        );
        assert_eq!(
            GeneticAlgorithm::new(GaConfig::default(), Catalog::new(vec![])).err(),
            Some(GaError::EmptyCatalog)
        );
        let ga = GeneticAlgorithm::new(GaConfig::default(), catalog).expect("valid");
        assert_eq!(ga.history().capacity(), 50);
        assert!(ga.history().is_empty());
    }

    #[test]
    fn test_init_population() {
        let ga = engine(GaConfig::default().with_population_size(25), 12, 42);
        let mut rng = create_rng(1);
        let pop = ga.init_population(&mut rng);

        assert_eq!(pop.size(), 25);
        for ind in pop.individuals() {
            assert_eq!(ind.chromosome_length(), 12);
            assert!(ind.is_evaluated());
            if ind.volume() > 40 {
                assert_eq!(ind.fitness(), 0);
            }
        }
    }

    #[test]
    fn test_evaluate_refreshes_stale_members() {
        let ga = engine(GaConfig::default(), 8, 42);
        let mut rng = create_rng(1);
        let pop = ga.init_population(&mut rng);

        let mut mutated = ga.mutate_population(&pop, &mut rng);
        let mut edited = mutated.individual(5).clone();
        edited.flip_gene(0);
        mutated.set_individual(5, edited);
        ga.evaluate(&mut mutated);

        let mut expected = mutated.individual(5).clone();
        expected.evaluate(ga.catalog());
        assert_eq!(mutated.individual(5).fitness(), expected.fitness());
        let sum: i64 = mutated.individuals().iter().map(|i| i.fitness()).sum();
        assert_eq!(mutated.population_fitness(), sum as f64);
    }

    #[test]
    fn test_converged_on_last_generation() {
        let ga = engine(GaConfig::default().with_max_generations(5), 6, 42);
        let (_, pop) = with_fitness(&[1, 2, 3]);
        assert!(!ga.is_converged(3, &pop));
        assert!(ga.is_converged(4, &pop));
    }

    #[test]
    fn test_budget_of_one_converges_immediately() {
        let ga = engine(GaConfig::default().with_max_generations(1), 6, 42);
        let (_, pop) = with_fitness(&[1, 2, 3]);
        assert!(ga.is_converged(0, &pop));
    }

    #[test]
    fn test_stability_needs_full_window() {
        // Nine identical members: too few to judge stability.
        let (ga, pop) = with_fitness(&[4; 9]);
        assert!(!is_fitness_stable(&pop));
        assert!(!ga.is_converged(0, &pop));

        let (ga, pop) = with_fitness(&[4; 10]);
        assert!(is_fitness_stable(&pop));
        assert!(ga.is_converged(0, &pop));
    }

    #[test]
    fn test_stability_uses_storage_order_not_rank() {
        // Positions 0..10 agree, but the two best members sit at the end:
        // the ranked top ten would not agree.
        let (_, pop) = with_fitness(&[5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 8, 8]);
        assert!(is_fitness_stable(&pop));

        // The ranked top ten agree, but position 0 breaks the window.
        let (_, pop) = with_fitness(&[1, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5]);
        assert!(!is_fitness_stable(&pop));
    }

    #[test]
    fn test_crossover_rate_zero_copies_ranked_order() {
        let (ga, pop) = with_fitness(&[3, 9, 1, 7]);
        let ga = GeneticAlgorithm {
            config: ga.config.clone().with_crossover_rate(0.0),
            ..ga
        };
        let mut rng = create_rng(42);
        let next = ga.crossover_population(&pop, &mut rng);

        let fitness: Vec<i64> = next.individuals().iter().map(|i| i.fitness()).collect();
        assert_eq!(fitness, vec![9, 7, 3, 1]);
    }

    #[test]
    fn test_crossover_full_rate_spares_elites() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_crossover_rate(1.0)
            .with_elitism_count(3);
        let ga = engine(config, 15, 42);
        let mut rng = create_rng(7);
        let pop = ga.init_population(&mut rng);
        let next = ga.crossover_population(&pop, &mut rng);

        assert_eq!(next.size(), 30);
        for rank in 0..3 {
            assert_eq!(next.individual(rank), pop.fittest(rank));
        }
        for ind in &next.individuals()[3..] {
            assert!(!ind.is_evaluated(), "offspring are unevaluated");
        }
    }

    #[test]
    fn test_mutation_protects_one_extra_rank() {
        let (ga, pop) = with_fitness(&[2, 8, 6, 4, 9, 1]);
        let ga = GeneticAlgorithm {
            config: ga
                .config
                .clone()
                .with_elitism_count(2)
                .with_mutation_rate(1.0),
            ..ga
        };
        let mut rng = create_rng(42);
        let next = ga.mutate_population(&pop, &mut rng);

        // Ranks 0, 1 and 2 keep their genes.
        for rank in 0..=2 {
            assert_eq!(next.individual(rank).chromosome(), pop.fittest(rank).chromosome());
        }
        // Every gene of the remaining ranks flipped.
        for rank in 3..6 {
            let original = pop.fittest(rank).chromosome();
            let mutated = next.individual(rank).chromosome();
            assert!(original.iter().zip(mutated).all(|(a, b)| a != b));
        }
    }

    #[test]
    fn test_mutation_leaves_input_untouched() {
        let ga = engine(GaConfig::default().with_mutation_rate(1.0), 10, 42);
        let mut rng = create_rng(3);
        let pop = ga.init_population(&mut rng);
        let before = pop.clone();
        ga.mutate_population(&pop, &mut rng);
        assert_eq!(pop, before);
    }

    #[test]
    fn test_step_produces_evaluated_population() {
        let config = GaConfig::default().with_population_size(40);
        let ga = engine(config, 20, 42);
        let mut rng = create_rng(9);
        let pop = ga.init_population(&mut rng);
        let next = ga.step(&pop, &mut rng);

        assert_eq!(next.size(), 40);
        for ind in next.individuals() {
            assert!(ind.is_evaluated());
            assert_eq!(ind.chromosome_length(), 20);
            if ind.volume() > 40 {
                assert_eq!(ind.fitness(), 0);
            }
        }
        let sum: i64 = next.individuals().iter().map(|i| i.fitness()).sum();
        assert_eq!(next.population_fitness(), sum as f64);
    }

    #[test]
    fn test_record_generation() {
        let mut ga = engine(GaConfig::default().with_max_generations(3), 5, 42);
        let mut rng = create_rng(1);
        let pop = ga.init_population(&mut rng);
        ga.record_generation(0, pop.clone());

        assert_eq!(ga.generation(0), Some(&pop));
        assert!(ga.generation(1).is_none());
    }

    #[test]
    #[should_panic(expected = "already recorded")]
    fn test_record_generation_twice_panics() {
        let mut ga = engine(GaConfig::default(), 5, 42);
        let pop = Population::empty(10, 5, 40);
        ga.record_generation(2, pop.clone());
        ga.record_generation(2, pop);
    }

    proptest! {
        #[test]
        fn prop_crossover_preserves_elites(
            seed in any::<u64>(),
            elitism in 0usize..6,
            rate in 0.0f64..=1.0,
        ) {
            let config = GaConfig::default()
                .with_population_size(12)
                .with_elitism_count(elitism)
                .with_crossover_rate(rate);
            let ga = engine(config, 10, seed);
            let mut rng = create_rng(seed ^ 0x5eed);
            let pop = ga.init_population(&mut rng);
            let next = ga.crossover_population(&pop, &mut rng);

            prop_assert_eq!(next.size(), pop.size());
            for rank in 0..elitism {
                prop_assert_eq!(next.individual(rank).chromosome(), pop.fittest(rank).chromosome());
            }
        }

        #[test]
        fn prop_mutation_never_touches_elites(
            seed in any::<u64>(),
            elitism in 0usize..6,
        ) {
            let config = GaConfig::default()
                .with_population_size(12)
                .with_elitism_count(elitism)
                .with_mutation_rate(0.5);
            let ga = engine(config, 10, seed);
            let mut rng = create_rng(seed ^ 0x5eed);
            let pop = ga.init_population(&mut rng);
            let next = ga.mutate_population(&pop, &mut rng);

            for rank in 0..=elitism {
                prop_assert_eq!(next.individual(rank).chromosome(), pop.fittest(rank).chromosome());
            }
        }
    }
}

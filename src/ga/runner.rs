//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the engine generation by generation:
//! initialization → evaluation → (selection → crossover → mutation →
//! evaluation) → repeat until the termination test passes.

use super::config::GaConfig;
use super::engine::{is_fitness_stable, GeneticAlgorithm};
use super::history::GenerationHistory;
use super::population::Population;
use super::types::Individual;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::random::create_rng;

/// Snapshot of one recorded generation, passed to observers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index (0 is the initial population).
    pub generation: usize,
    /// Genes of the generation's fittest member.
    pub best_chromosome: Vec<bool>,
    pub best_fitness: i64,
    pub best_volume: i64,
    /// Total fitness of the generation.
    pub population_fitness: f64,
    /// Total fitness divided by the population size.
    pub mean_fitness: f64,
}

impl GenerationStats {
    fn of(generation: usize, population: &Population) -> Self {
        let best = population.fittest(0);
        Self {
            generation,
            best_chromosome: best.chromosome().to_vec(),
            best_fitness: best.fitness(),
            best_volume: best.volume(),
            population_fitness: population.population_fitness(),
            mean_fitness: population.mean_fitness(),
        }
    }
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Fittest member of the final generation.
    pub best: Individual,

    /// Fittest member seen in any generation.
    pub best_of_run: Individual,

    /// Number of recorded generations, including the initial population.
    pub generations: usize,

    /// Whether the run stopped on the fitness stability check rather than
    /// the generation budget.
    pub converged: bool,

    /// Best fitness of each recorded generation.
    pub fitness_history: Vec<i64>,

    /// Every recorded population.
    pub history: GenerationHistory,
}

/// Executes the knapsack GA loop.
///
/// # Usage
///
/// ```
/// use knapsack_ga::catalog::Catalog;
/// use knapsack_ga::ga::{GaConfig, GaRunner};
///
/// let catalog = Catalog::from(vec![(5, 10), (4, 4), (3, 8), (2, 3)]);
/// let config = GaConfig::default()
///     .with_knapsack_capacity(9)
///     .with_max_generations(20)
///     .with_seed(42);
/// let result = GaRunner::run(catalog, &config).unwrap();
/// assert!(result.generations <= 20);
/// assert_eq!(result.fitness_history.len(), result.generations);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA to termination.
    pub fn run(catalog: Catalog, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_observer(catalog, config, |_, _| {})
    }

    /// Runs the GA, calling `observer` once per recorded generation
    /// (including generation 0) with its stats and the population itself.
    pub fn run_with_observer<F>(
        catalog: Catalog,
        config: &GaConfig,
        mut observer: F,
    ) -> Result<GaResult>
    where
        F: FnMut(&GenerationStats, &Population),
    {
        let mut ga = GeneticAlgorithm::new(config.clone(), catalog)?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        // 1. Initialize (members come back evaluated)
        let mut population = ga.init_population(&mut rng);

        let mut best_of_run = population.fittest(0).clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations);
        fitness_history.push(best_of_run.fitness());
        observer(&GenerationStats::of(0, &population), &population);

        // 2. Evolutionary loop
        let mut generation = 0;
        while !ga.is_converged(generation, &population) {
            let next = ga.step(&population, &mut rng);
            let previous = std::mem::replace(&mut population, next);
            ga.record_generation(generation, previous);
            generation += 1;

            let stats = GenerationStats::of(generation, &population);
            log::debug!(
                "generation {}: best fitness {} (volume {}), mean fitness {:.2}",
                generation,
                stats.best_fitness,
                stats.best_volume,
                stats.mean_fitness
            );

            let gen_best = population.fittest(0);
            if gen_best.fitness() > best_of_run.fitness() {
                best_of_run = gen_best.clone();
            }
            fitness_history.push(stats.best_fitness);
            observer(&stats, &population);
        }

        let converged = is_fitness_stable(&population);
        let best = population.fittest(0).clone();
        ga.record_generation(generation, population);

        log::info!(
            "stopped after {} generation(s) ({}): best fitness {}, best of run {}",
            generation + 1,
            if converged { "fitness stable" } else { "budget exhausted" },
            best.fitness(),
            best_of_run.fitness()
        );

        Ok(GaResult {
            best,
            best_of_run,
            generations: generation + 1,
            converged,
            fitness_history,
            history: ga.into_history(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::GaError;

/// Configuration for the knapsack GA.
///
/// # Defaults
///
/// ```
/// use knapsack_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_generations, 50);
/// assert_eq!(config.knapsack_capacity, 40);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use knapsack_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_elitism_count(2)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Generation budget. Generation indices run `0..max_generations`.
    pub max_generations: usize,

    /// Per-gene flip probability (0.0–1.0) for non-elite individuals.
    pub mutation_rate: f64,

    /// Probability (0.0–1.0) that a non-elite individual is replaced by a
    /// two-point crossover offspring.
    pub crossover_rate: f64,

    /// Number of top-ranked individuals carried over without crossover.
    ///
    /// Mutation protects one more rank than crossover: ranks
    /// `0..=elitism_count` are never mutated.
    pub elitism_count: usize,

    /// Maximum total volume of a feasible selection.
    pub knapsack_capacity: u32,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: 50,
            mutation_rate: 0.1,
            crossover_rate: 0.7,
            elitism_count: 1,
            knapsack_capacity: 40,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elitism count.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the knapsack capacity.
    pub fn with_knapsack_capacity(mut self, capacity: u32) -> Self {
        self.knapsack_capacity = capacity;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::EmptyPopulation);
        }
        if self.max_generations == 0 {
            return Err(GaError::ZeroGenerationBudget);
        }
        check_rate("mutation_rate", self.mutation_rate)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        if self.elitism_count > self.population_size {
            return Err(GaError::ElitismExceedsPopulation {
                elitism_count: self.elitism_count,
                population_size: self.population_size,
            });
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), GaError> {
    // NaN fails the range check too.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GaError::RateOutOfRange { name, value })
    }
}

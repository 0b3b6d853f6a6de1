//! Fixed-size population of knapsack individuals.
//!
//! A [`Population`] owns its members and a cached total fitness. The total
//! and the per-member normalized fitness are only refreshed by the explicit
//! `recompute_*` methods.

use std::fmt;

use rand::Rng;

use super::types::Individual;
use crate::catalog::Catalog;
use crate::random;

/// A generation of candidate solutions.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
    population_fitness: f64,
    knapsack_capacity: u32,
}

impl Population {
    /// Creates `population_size` random individuals and fully evaluates them.
    ///
    /// Volume, fitness, normalized fitness and the cumulative normalized
    /// fitness (prefix sum in construction order) are all current on return.
    pub fn random<R: Rng>(
        population_size: usize,
        num_items: usize,
        knapsack_capacity: u32,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Self {
        let individuals = (0..population_size)
            .map(|_| {
                let mut ind = Individual::random(num_items, knapsack_capacity, rng);
                ind.evaluate_volume(catalog);
                ind.evaluate_fitness(catalog);
                ind
            })
            .collect();

        let mut population = Self::from_individuals(individuals, knapsack_capacity);
        population.population_fitness = population.fitness_sum();
        population.recompute_normalized_fitness();
        population
    }

    /// Creates `population_size` slots holding empty knapsacks, to be
    /// overwritten with [`set_individual`](Self::set_individual).
    pub fn empty(population_size: usize, num_items: usize, knapsack_capacity: u32) -> Self {
        let individuals = (0..population_size)
            .map(|_| Individual::empty(num_items, knapsack_capacity))
            .collect();
        Self::from_individuals(individuals, knapsack_capacity)
    }

    /// Wraps an assembled member list. Population fitness stays `0.0` until
    /// [`recompute_fitness`](Self::recompute_fitness) is called.
    pub fn from_individuals(individuals: Vec<Individual>, knapsack_capacity: u32) -> Self {
        Self {
            individuals,
            population_fitness: 0.0,
            knapsack_capacity,
        }
    }

    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    pub fn knapsack_capacity(&self) -> u32 {
        self.knapsack_capacity
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Returns member `index` in storage order.
    ///
    /// # Panics
    /// Panics if `index >= self.size()`.
    pub fn individual(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    /// Replaces member `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.size()`.
    pub fn set_individual(&mut self, index: usize, individual: Individual) {
        self.individuals[index] = individual;
    }

    /// Cached total fitness as of the last recomputation.
    pub fn population_fitness(&self) -> f64 {
        self.population_fitness
    }

    /// Cached total fitness divided by the population size.
    pub fn mean_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            0.0
        } else {
            self.population_fitness / self.individuals.len() as f64
        }
    }

    /// Members ordered best first. Ties keep storage order.
    ///
    /// Storage is not reordered; see [`sort_by_fitness`](Self::sort_by_fitness).
    ///
    /// # Complexity
    /// O(n log n)
    pub fn ranked(&self) -> Vec<&Individual> {
        let mut ranked: Vec<&Individual> = self.individuals.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.fitness().cmp(&a.fitness()));
        ranked
    }

    /// Returns the member at `rank` (0 is best) without reordering storage.
    ///
    /// # Panics
    /// Panics if `rank >= self.size()`.
    pub fn fittest(&self, rank: usize) -> &Individual {
        assert!(
            rank < self.individuals.len(),
            "rank {rank} out of range for population of {}",
            self.individuals.len()
        );
        self.ranked()[rank]
    }

    /// Sorts storage best first. Ties keep their previous order.
    pub fn sort_by_fitness(&mut self) {
        self.individuals.sort_by(|a, b| b.fitness().cmp(&a.fitness()));
    }

    /// Re-evaluates every member's fitness and refreshes the population total.
    pub fn recompute_fitness(&mut self, catalog: &Catalog) {
        for ind in &mut self.individuals {
            ind.evaluate_fitness(catalog);
        }
        self.population_fitness = self.fitness_sum();
    }

    /// Re-evaluates every member's volume.
    pub fn recompute_volume(&mut self, catalog: &Catalog) {
        for ind in &mut self.individuals {
            ind.evaluate_volume(catalog);
        }
    }

    /// Refreshes each member's normalized fitness (`fitness / total`) and the
    /// running prefix sum of normalized fitness in storage order.
    ///
    /// A zero total gives every member a normalized fitness of `0.0`.
    pub fn recompute_normalized_fitness(&mut self) {
        let total = self.population_fitness;
        if total <= 0.0 {
            log::warn!("population fitness is {total}; normalized fitness set to zero");
        }

        let mut cumulative = 0.0;
        for ind in &mut self.individuals {
            let normalized = if total > 0.0 {
                ind.fitness() as f64 / total
            } else {
                0.0
            };
            cumulative += normalized;
            ind.set_normalized_fitness(normalized);
            ind.set_cumulative_normalized_fitness(cumulative);
        }
    }

    /// Randomly permutes the members (Fisher–Yates).
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        random::shuffle(&mut self.individuals, rng);
    }

    fn fitness_sum(&self) -> f64 {
        self.individuals.iter().map(|ind| ind.fitness() as f64).sum()
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ind in &self.individuals {
            writeln!(
                f,
                "{ind}  Fitness: {}   Volume: {}",
                ind.fitness(),
                ind.volume()
            )?;
        }
        Ok(())
    }
}

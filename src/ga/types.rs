//! Candidate solution representation.
//!
//! An [`Individual`] is a binary chromosome (one gene per catalog item)
//! plus the cached values the GA computes from it. The caches are only
//! refreshed by the `evaluate_*` methods; editing genes leaves them stale.

use std::fmt;

use rand::Rng;

use crate::catalog::Catalog;

/// Sentinel stored in `fitness` and `volume` before the first evaluation.
pub const UNEVALUATED: i64 = -1;

/// A knapsack selection: gene `i` is `true` when item `i` is packed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    chromosome: Vec<bool>,
    knapsack_capacity: u32,
    fitness: i64,
    volume: i64,
    normalized_fitness: f64,
    cumulative_normalized_fitness: f64,
}

impl Individual {
    /// Creates an individual whose genes are each packed with probability 0.5.
    pub fn random<R: Rng>(chromosome_length: usize, knapsack_capacity: u32, rng: &mut R) -> Self {
        let chromosome = (0..chromosome_length).map(|_| rng.random_bool(0.5)).collect();
        Self::from_chromosome(chromosome, knapsack_capacity)
    }

    /// Creates an unevaluated individual from explicit genes.
    pub fn from_chromosome(chromosome: Vec<bool>, knapsack_capacity: u32) -> Self {
        Self {
            chromosome,
            knapsack_capacity,
            fitness: UNEVALUATED,
            volume: UNEVALUATED,
            normalized_fitness: 0.0,
            cumulative_normalized_fitness: 0.0,
        }
    }

    /// Creates an individual with every item left out.
    pub fn empty(chromosome_length: usize, knapsack_capacity: u32) -> Self {
        Self::from_chromosome(vec![false; chromosome_length], knapsack_capacity)
    }

    pub fn chromosome(&self) -> &[bool] {
        &self.chromosome
    }

    pub fn chromosome_length(&self) -> usize {
        self.chromosome.len()
    }

    pub fn knapsack_capacity(&self) -> u32 {
        self.knapsack_capacity
    }

    /// Returns gene `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.chromosome_length()`.
    pub fn gene(&self, index: usize) -> bool {
        self.chromosome[index]
    }

    /// Sets gene `index`. Cached values are not refreshed.
    ///
    /// # Panics
    /// Panics if `index >= self.chromosome_length()`.
    pub fn set_gene(&mut self, index: usize, packed: bool) {
        self.chromosome[index] = packed;
    }

    /// Toggles gene `index`. Cached values are not refreshed.
    ///
    /// # Panics
    /// Panics if `index >= self.chromosome_length()`.
    pub fn flip_gene(&mut self, index: usize) {
        self.chromosome[index] = !self.chromosome[index];
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [bool] {
        &mut self.chromosome
    }

    /// Recomputes the cached volume: the sum of packed item volumes.
    ///
    /// # Panics
    /// Panics if the catalog length differs from the chromosome length.
    pub fn evaluate_volume(&mut self, catalog: &Catalog) {
        self.check_catalog(catalog);
        self.volume = self.packed_volume(catalog);
    }

    /// Recomputes the cached fitness: the sum of packed item benefits, or 0
    /// when the packed volume exceeds the knapsack capacity.
    ///
    /// The volume cache is refreshed as part of the feasibility check.
    ///
    /// # Panics
    /// Panics if the catalog length differs from the chromosome length.
    pub fn evaluate_fitness(&mut self, catalog: &Catalog) {
        self.check_catalog(catalog);
        let mut benefit = 0i64;
        let mut volume = 0i64;
        for (&packed, item) in self.chromosome.iter().zip(catalog.iter()) {
            if packed {
                benefit += item.benefit as i64;
                volume += item.volume as i64;
            }
        }
        self.volume = volume;
        self.fitness = if volume > self.knapsack_capacity as i64 {
            0
        } else {
            benefit
        };
    }

    /// Evaluates volume, then fitness.
    pub fn evaluate(&mut self, catalog: &Catalog) {
        self.evaluate_volume(catalog);
        self.evaluate_fitness(catalog);
    }

    /// Cached fitness, [`UNEVALUATED`] before the first evaluation.
    pub fn fitness(&self) -> i64 {
        self.fitness
    }

    /// Cached volume, [`UNEVALUATED`] before the first evaluation.
    pub fn volume(&self) -> i64 {
        self.volume
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness != UNEVALUATED && self.volume != UNEVALUATED
    }

    /// Whether the cached volume fits the knapsack.
    pub fn is_feasible(&self) -> bool {
        self.is_evaluated() && self.volume <= self.knapsack_capacity as i64
    }

    pub fn normalized_fitness(&self) -> f64 {
        self.normalized_fitness
    }

    pub fn set_normalized_fitness(&mut self, value: f64) {
        self.normalized_fitness = value;
    }

    pub fn cumulative_normalized_fitness(&self) -> f64 {
        self.cumulative_normalized_fitness
    }

    pub fn set_cumulative_normalized_fitness(&mut self, value: f64) {
        self.cumulative_normalized_fitness = value;
    }

    fn packed_volume(&self, catalog: &Catalog) -> i64 {
        self.chromosome
            .iter()
            .zip(catalog.iter())
            .filter(|(packed, _)| **packed)
            .map(|(_, item)| item.volume as i64)
            .sum()
    }

    fn check_catalog(&self, catalog: &Catalog) {
        assert_eq!(
            self.chromosome.len(),
            catalog.len(),
            "chromosome length must match catalog length"
        );
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &packed) in self.chromosome.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(if packed { "1" } else { "0" })?;
        }
        Ok(())
    }
}

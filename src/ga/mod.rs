//! Knapsack genetic algorithm.
//!
//! A generational GA over binary chromosomes: gene `i` says whether item `i`
//! of the [`Catalog`](crate::catalog::Catalog) is packed. Each generation
//! runs roulette-wheel selection, two-point crossover against a tournament
//! partner, and bit-flip mutation, with the top ranks protected by elitism.
//!
//! # Key Types
//!
//! - [`Individual`]: chromosome plus cached fitness, volume and normalized
//!   fitness
//! - [`Population`]: fixed-size member list with cached total fitness
//! - [`GeneticAlgorithm`]: the stage operations and the termination test
//! - [`GaConfig`]: run parameters
//! - [`GaRunner`]: executes the evolutionary loop
//! - [`GaResult`]: final result with per-generation history
//!
//! # Submodules
//!
//! - [`operators`]: cut points, two-point crossover, bit-flip mutation
//! - [`selection`]: roulette wheel and full-population tournament
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Martello & Toth (1990), *Knapsack Problems: Algorithms and Computer Implementations*

mod config;
mod engine;
mod history;
pub mod operators;
mod population;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use engine::{is_fitness_stable, GeneticAlgorithm, STABILITY_WINDOW};
pub use history::GenerationHistory;
pub use population::Population;
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use types::{Individual, UNEVALUATED};

//! Genetic algorithm for the 0/1 knapsack problem.
//!
//! A population of candidate item selections evolves under
//! fitness-proportionate selection, two-point crossover and bit-flip
//! mutation until the leading members agree on a fitness value or the
//! generation budget runs out.
//!
//! - [`catalog`]: the immutable item list (volume, benefit)
//! - [`ga`]: individuals, populations, the stage operations and the runner
//! - [`random`]: seedable RNG construction and shuffling
//!
//! Every stage takes an explicit `&mut impl Rng`, so a seeded generator
//! reproduces a whole run.
//!
//! # Example
//!
//! ```
//! use knapsack_ga::catalog::Catalog;
//! use knapsack_ga::ga::{GaConfig, GaRunner};
//! use knapsack_ga::random::create_rng;
//!
//! let mut rng = create_rng(1);
//! let catalog = Catalog::random(10, &mut rng);
//! let config = GaConfig::default().with_seed(42);
//!
//! let result = GaRunner::run(catalog, &config).unwrap();
//! println!("best: {} (fitness {})", result.best, result.best.fitness());
//! ```

pub mod catalog;
pub mod error;
pub mod ga;
pub mod random;

pub use error::GaError;

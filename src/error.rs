use thiserror::Error;

/// Errors reported before a GA run starts.
///
/// Only invalid run parameters are recoverable. Out-of-range gene, member
/// or history indices are contract violations and panic instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaError {
    #[error("population_size must be at least 1")]
    EmptyPopulation,

    #[error("max_generations must be at least 1")]
    ZeroGenerationBudget,

    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("elitism_count ({elitism_count}) exceeds population_size ({population_size})")]
    ElitismExceedsPopulation {
        elitism_count: usize,
        population_size: usize,
    },

    #[error("item catalog is empty")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, GaError>;

//! Error types.
//!
//! Only configuration problems are errors. Dirty catalog data (bad time
//! strings, unknown weekdays) is skipped where it is found. Offerings
//! without candidates are left out by the solver and only surface here when
//! a [`TimetableProblem`](crate::search::TimetableProblem) is built by hand.

use thiserror::Error;

/// Invalid search or engine configuration.
///
/// Reported synchronously by the `validate` methods, before any search work
/// starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("max_generations must be at least 1")]
    ZeroGenerations,

    #[error("return_size must be at least 1")]
    ZeroReturnSize,

    #[error("population_size ({population_size}) must be at least return_size ({return_size})")]
    ReturnSizeExceedsPopulation {
        population_size: usize,
        return_size: usize,
    },

    #[error("elite_ratio must be in (0, 1), got {0}")]
    EliteRatioOutOfRange(f64),

    #[error("elite_ratio too high: {elite_count} elites fill a population of {population_size}")]
    ElitesFillPopulation {
        elite_count: usize,
        population_size: usize,
    },

    #[error("tournament size must be at least 1")]
    ZeroTournamentSize,

    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(u8),

    #[error(
        "fitness weights are not dominant: conflict and unwanted-hour weights must exceed {required}"
    )]
    WeightsNotDominant { required: i64 },
}

/// Error returned by a search call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A problem was built over an offering it cannot assign.
    #[error("offering {0:?} has no candidates")]
    NoCandidates(String),
}

//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;
use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the genetic search.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(3))
///     .with_elite_ratio(0.25)
///     .with_seed(7);
/// assert_eq!(config.elite_count(), 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Number of generations. The loop always runs all of them unless
    /// cancelled; there is no convergence-based early stop.
    pub max_generations: usize,

    /// How a parent is picked from the elites for each offspring.
    pub selection: Selection,

    /// Fraction of the population kept as parents each generation (0.0–1.0,
    /// exclusive). At least one individual is always kept.
    ///
    /// Typical range: 0.1–0.5.
    pub elite_ratio: f64,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Has no effect when the `parallel` feature is disabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            selection: Selection::default(),
            elite_ratio: 0.1,
            parallel: true,
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

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the parent selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the elite ratio, clamped to 0.0–1.0.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of parents kept each generation.
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.elite_ratio).round() as usize).max(1)
    }

    /// Preset for interactive use: small population, few generations.
    ///
    /// - Population: 50, Generations: 200, Elite ratio: 0.2
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            elite_ratio: 0.2,
            ..Self::default()
        }
    }

    /// Preset matching the defaults.
    ///
    /// - Population: 100, Generations: 1000, Elite ratio: 0.1
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for large course loads with many sections per course.
    ///
    /// - Population: 200, Generations: 2000, Elite ratio: 0.25
    pub fn thorough() -> Self {
        Self {
            population_size: 200,
            max_generations: 2000,
            elite_ratio: 0.25,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if !(self.elite_ratio > 0.0 && self.elite_ratio < 1.0) {
            return Err(ConfigError::EliteRatioOutOfRange(self.elite_ratio));
        }
        let elite_count = self.elite_count();
        if elite_count >= self.population_size {
            return Err(ConfigError::ElitesFillPopulation {
                elite_count,
                population_size: self.population_size,
            });
        }
        if self.selection == Selection::Tournament(0) {
            return Err(ConfigError::ZeroTournamentSize);
        }
        Ok(())
    }
}

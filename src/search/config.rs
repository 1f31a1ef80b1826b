//! Search configuration.

use crate::error::ConfigError;
use crate::ga::{GaConfig, Selection};
use crate::timetable::{FitnessWeights, HourSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How unwanted hours are treated.
///
/// Fitness weighting is the same under both policies: every hit costs the
/// `unwanted_hour` weight, which dominates days off and idle time. The
/// policies differ only in what may be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnwantedHours {
    /// Hits are a strong preference. Schedules with hits can still be
    /// returned (ranked after every schedule with fewer hits) when nothing
    /// better exists.
    #[default]
    Penalize,
    /// Hits disqualify a schedule, like conflicts do.
    Exclude,
}

/// Full configuration of a timetable search.
///
/// # Examples
///
/// ```
/// use u_timetable::search::{SearchConfig, UnwantedHours};
/// use u_timetable::timetable::HourSet;
///
/// let config = SearchConfig::default()
///     .with_population_size(50)
///     .with_max_generations(200)
///     .with_return_size(5)
///     .with_unwanted_hours(HourSet::from_hours([8, 18]).unwrap())
///     .with_unwanted_policy(UnwantedHours::Exclude);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Engine parameters.
    pub ga: GaConfig,

    /// Maximum number of schedules returned.
    pub return_size: usize,

    /// Hours of the day the student wants to keep free.
    pub unwanted_hours: HourSet,

    /// Whether unwanted hours are a preference or a hard filter.
    pub unwanted_policy: UnwantedHours,

    /// Score weights.
    pub weights: FitnessWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ga: GaConfig::default(),
            return_size: 10,
            unwanted_hours: HourSet::empty(),
            unwanted_policy: UnwantedHours::default(),
            weights: FitnessWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Replaces the engine parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.ga = self.ga.with_population_size(n);
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.ga = self.ga.with_max_generations(n);
        self
    }

    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.ga = self.ga.with_elite_ratio(ratio);
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.ga = self.ga.with_selection(selection);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.ga = self.ga.with_parallel(parallel);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga = self.ga.with_seed(seed);
        self
    }

    pub fn with_return_size(mut self, n: usize) -> Self {
        self.return_size = n;
        self
    }

    pub fn with_unwanted_hours(mut self, hours: HourSet) -> Self {
        self.unwanted_hours = hours;
        self
    }

    pub fn with_unwanted_policy(mut self, policy: UnwantedHours) -> Self {
        self.unwanted_policy = policy;
        self
    }

    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validates every parameter.
    ///
    /// The population/return-size relation is checked first: asking for
    /// more results than there are individuals is the most common mistake.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.return_size == 0 {
            return Err(ConfigError::ZeroReturnSize);
        }
        if self.ga.population_size < self.return_size {
            return Err(ConfigError::ReturnSizeExceedsPopulation {
                population_size: self.ga.population_size,
                return_size: self.return_size,
            });
        }
        self.ga.validate()?;
        self.weights.validate()
    }
}

//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! evolutionary loop and a concrete problem such as timetable construction.

use rand::Rng;
use std::hash::Hash;

/// Marker trait for fitness values.
///
/// **Higher fitness is better** (maximization).
///
/// Implemented for `i64`, the timetable score type.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// The worst possible fitness, used for individuals not yet evaluated.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for history and logging.
    fn to_f64(self) -> f64;
}

impl Fitness for i64 {
    fn worst() -> Self {
        i64::MIN
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution in the population.
///
/// Individuals carry their own fitness. The engine calls
/// [`GaProblem::evaluate`] and stores the value via
/// [`set_fitness`](Individual::set_fitness).
pub trait Individual: Clone + Send + Sync {
    type Fitness: Fitness;

    fn fitness(&self) -> Self::Fitness;

    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a problem for the GA engine.
///
/// 1. **Initialization**: a uniformly random individual
/// 2. **Evaluation**: fitness, higher is better
/// 3. **Mutation**: a small in-place change (the engine clones parents first)
/// 4. **Identity**: a key under which two individuals count as duplicates
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because evaluation may run on the rayon
/// pool.
pub trait GaProblem: Send + Sync {
    type Individual: Individual;

    /// Duplicate-detection key. Equal keys must imply equal fitness.
    type Key: Eq + Hash;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual.
    ///
    /// This is typically the most expensive operation and may be called
    /// concurrently for different individuals.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);

    /// Identity of an individual for de-duplication.
    fn key(&self, individual: &Self::Individual) -> Self::Key;

    /// Called at the end of each generation with the current best fitness.
    ///
    /// The default implementation is a no-op.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}

//! Parent selection among the elites.
//!
//! Each generation keeps the best individuals as parents; every offspring is
//! a mutated clone of one of them. [`Selection`] decides which one.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Strategy for picking a parent from the elite pool.
///
/// All strategies assume **maximization** (higher fitness = better).
///
/// # Examples
///
/// ```
/// use u_timetable::ga::Selection;
///
/// // Every elite equally likely (the default)
/// let sel = Selection::Uniform;
///
/// // Extra pressure toward the top of the elite pool
/// let sel = Selection::Tournament(2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Selection {
    /// Any elite with equal probability.
    ///
    /// Truncation already applies the selection pressure, so the elites
    /// keep maximum diversity.
    #[default]
    Uniform,

    /// Pick `k` elites at random, keep the best.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Linear ranking over the elites: weight `n - rank`.
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Selection {
    /// Select a parent index from `parents`.
    ///
    /// # Panics
    /// Panics if `parents` is empty.
    pub fn select<I: Individual, R: Rng>(&self, parents: &[I], rng: &mut R) -> usize {
        assert!(!parents.is_empty(), "cannot select from empty population");

        match self {
            Selection::Uniform => rng.random_range(0..parents.len()),
            Selection::Tournament(k) => tournament(parents, *k, rng),
            Selection::Rank => rank(parents, rng),
        }
    }
}

/// Tournament selection: pick k random individuals, return best.
fn tournament<I: Individual, R: Rng>(parents: &[I], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = parents.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if parents[idx].fitness() > parents[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Rank-based selection using linear ranking, best first.
fn rank<I: Individual, R: Rng>(parents: &[I], rng: &mut R) -> usize {
    let n = parents.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<usize> = (0..n).collect();
    indexed.sort_by(|&a, &b| {
        parents[b]
            .fitness()
            .partial_cmp(&parents[a].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // weight_i = n - rank_i
    let total = n * (n + 1) / 2;
    let threshold = rng.random_range(0..total);
    let mut cumulative = 0;
    for (rank, &original_idx) in indexed.iter().enumerate() {
        cumulative += n - rank;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed[n - 1]
}

//! Genetic search engine.
//!
//! A generic elitist GA built on trait-based abstractions. A problem plugs
//! in by implementing [`GaProblem`]: how to create, evaluate, mutate, and
//! identify individuals.
//!
//! # Loop
//!
//! 1. Evaluate and sort the population, best first
//! 2. Keep the top [`GaConfig::elite_ratio`] as parents
//! 3. Refill with mutated clones of parents chosen by [`Selection`]
//! 4. Drop duplicates by [`GaProblem::key`], backfill with fresh individuals
//!
//! The loop runs a fixed number of generations; only cancellation stops it
//! early.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
pub use types::{Fitness, GaProblem, Individual};

//! Timetable search.
//!
//! Binds the catalog to the [`ga`](crate::ga) engine:
//!
//! - [`TimetableProblem`]: one gene per offering, mutation re-draws one choice
//! - [`Scorer`]: the fitness seam, swapped for a memoizing scorer by the cache
//! - [`TimetableSolver`]: validation, the GA run, and finalization
//!
//! Finalization drops every schedule with a conflict (and, under
//! [`UnwantedHours::Exclude`], every schedule touching an unwanted hour), then
//! ranks by unwanted-hour hits, days off, idle time and score.

mod config;
mod problem;
mod solver;

pub use config::{SearchConfig, UnwantedHours};
pub use problem::{DirectScorer, Scorer, Timetable, TimetableProblem};
pub use solver::{SearchOutcome, TimetableSolver};

//! Timetable construction by evolutionary search.
//!
//! Given, for each course a student wants, the lecture/tutorial pairings
//! they could register for, picks one pairing per course so that the week
//! has no overlapping meetings, as many free weekdays as possible, little
//! idle time between classes, and nothing in the hours the student wants to
//! keep free.
//!
//! - [`catalog`]: course options, section combinations, offerings
//! - [`timetable`]: meeting intervals, schedules, conflict and fitness evaluation
//! - [`ga`]: a generic elitist genetic algorithm behind the [`ga::GaProblem`] trait
//! - [`search`]: the timetable problem and [`TimetableSolver`]
//! - [`cache`]: fingerprinted search memoization and a fitness memo
//!
//! # Example
//!
//! ```
//! use u_timetable::catalog::{CourseOption, MeetingRecord, OfferingCatalog, SectionCombination};
//! use u_timetable::{SearchConfig, TimetableSolver};
//!
//! let option = |id: &str, days: [&str; 2], time: &str| {
//!     SectionCombination::LectureOnly(
//!         CourseOption::new(id, "COMP 1405 A").with_meeting(MeetingRecord::new(days, time)),
//!     )
//! };
//! let catalog = OfferingCatalog::new()
//!     .with_offering(
//!         "COMP 1405",
//!         vec![option("A", ["Mon", "Wed"], "08:00-09:00"), option("B", ["Tue", "Thu"], "10:00-11:00")],
//!     )
//!     .with_offering("MATH 1104", vec![option("C", ["Mon", "Wed"], "08:30-09:30")]);
//!
//! let config = SearchConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(50)
//!     .with_return_size(5)
//!     .with_seed(42);
//! let outcome = TimetableSolver::run(&catalog, &config).unwrap();
//!
//! let best = outcome.best().unwrap();
//! assert_eq!(best.get("COMP 1405").unwrap().lecture().id, "B");
//! assert_eq!(best.report().conflicts, 0);
//! ```
//!
//! # Logging
//!
//! Progress is reported through `tracing`; the crate installs no subscriber.

pub mod cache;
pub mod catalog;
pub mod error;
pub mod ga;
pub mod search;
pub mod timetable;

pub use cache::SearchCache;
pub use error::{ConfigError, SearchError};
pub use search::{SearchConfig, SearchOutcome, TimetableSolver, UnwantedHours};
pub use timetable::{FitnessReport, FitnessWeights, HourSet, Schedule};

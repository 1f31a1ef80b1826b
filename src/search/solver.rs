//! Search entry point and result finalization.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::config::{SearchConfig, UnwantedHours};
use super::problem::{DirectScorer, Scorer, TimetableProblem};
use crate::catalog::{Offering, OfferingCatalog};
use crate::error::SearchError;
use crate::ga::GaRunner;
use crate::timetable::Schedule;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a timetable search.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOutcome {
    /// Conflict-free schedules, best first. May be empty.
    pub schedules: Vec<Schedule>,

    /// Offerings that had no candidates and were left out of every schedule.
    pub unschedulable: Vec<String>,

    /// Generations completed.
    pub generations: usize,

    /// Whether the search was cancelled before its last generation.
    pub cancelled: bool,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

impl SearchOutcome {
    pub fn best(&self) -> Option<&Schedule> {
        self.schedules.first()
    }

    /// True when no valid schedule was found.
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

/// Runs timetable searches.
///
/// # Usage
///
/// ```
/// use u_timetable::catalog::{CourseOption, MeetingRecord, OfferingCatalog, SectionCombination};
/// use u_timetable::search::{SearchConfig, TimetableSolver};
///
/// let lecture = CourseOption::new("10001", "COMP 1405 A")
///     .with_meeting(MeetingRecord::new(["Mon", "Wed"], "08:35-09:55"));
/// let catalog = OfferingCatalog::new()
///     .with_offering("COMP 1405", vec![SectionCombination::LectureOnly(lecture)]);
///
/// let config = SearchConfig::default()
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_return_size(3);
/// let outcome = TimetableSolver::run(&catalog, &config).unwrap();
/// assert_eq!(outcome.schedules.len(), 1);
/// ```
pub struct TimetableSolver;

impl TimetableSolver {
    /// Runs a search, scoring every schedule from scratch.
    pub fn run(catalog: &OfferingCatalog, config: &SearchConfig) -> Result<SearchOutcome, SearchError> {
        Self::run_with(catalog, config, &DirectScorer, None)
    }

    /// Runs a search that stops at the next generation boundary once
    /// `cancel` is set.
    pub fn run_with_cancel(
        catalog: &OfferingCatalog,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchOutcome, SearchError> {
        Self::run_with(catalog, config, &DirectScorer, cancel)
    }

    /// Runs a search with a caller-supplied scorer (e.g. a memoizing one).
    ///
    /// The configuration is validated before anything else happens.
    pub fn run_with<S: Scorer + ?Sized>(
        catalog: &OfferingCatalog,
        config: &SearchConfig,
        scorer: &S,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchOutcome, SearchError> {
        config.validate()?;

        let (schedulable, unschedulable): (Vec<&Offering>, Vec<&Offering>) = catalog
            .offerings()
            .iter()
            .partition(|o| !o.candidates.is_empty());
        let unschedulable: Vec<String> = unschedulable
            .into_iter()
            .map(|o| {
                tracing::warn!(offering = %o.name, "offering has no candidates, leaving it out");
                o.name.clone()
            })
            .collect();

        if schedulable.is_empty() {
            tracing::debug!("nothing to schedule");
            return Ok(SearchOutcome {
                unschedulable,
                ..SearchOutcome::default()
            });
        }

        tracing::info!(
            offerings = schedulable.len(),
            population = config.ga.population_size,
            generations = config.ga.max_generations,
            "starting timetable search"
        );

        let problem = TimetableProblem::new(
            schedulable,
            config.unwanted_hours,
            config.weights,
            scorer,
        )?;
        let result = GaRunner::run_with_cancel(&problem, &config.ga, cancel)?;

        // Finalize from the meeting data, never from the scorer's memory.
        let mut schedules: Vec<Schedule> = result
            .population
            .iter()
            .filter_map(|timetable| {
                let report = problem.rescore(timetable);
                let disqualified = report.conflicts > 0
                    || (config.unwanted_policy == UnwantedHours::Exclude
                        && report.unwanted_hour_hits > 0);
                (!disqualified).then(|| problem.to_schedule(timetable, report))
            })
            .collect();
        schedules.sort_by(rank_finalists);
        schedules.truncate(config.return_size);

        tracing::info!(
            returned = schedules.len(),
            generations = result.generations,
            cancelled = result.cancelled,
            "timetable search finished"
        );

        Ok(SearchOutcome {
            schedules,
            unschedulable,
            generations: result.generations,
            cancelled: result.cancelled,
            fitness_history: result.fitness_history,
        })
    }
}

/// Fewer unwanted-hour hits, then more days off, then less idle time, then
/// higher score.
fn rank_finalists(a: &Schedule, b: &Schedule) -> CmpOrdering {
    let (ra, rb) = (a.report(), b.report());
    ra.unwanted_hour_hits
        .cmp(&rb.unwanted_hour_hits)
        .then(rb.days_off.cmp(&ra.days_off))
        .then(ra.idle_minutes.cmp(&rb.idle_minutes))
        .then(rb.score.cmp(&ra.score))
}

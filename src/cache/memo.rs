//! Memoized fitness evaluation.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::store::{Eviction, LruStore};
use crate::catalog::CourseOption;
use crate::search::Scorer;
use crate::timetable::schedule::flatten_intervals;
use crate::timetable::{
    evaluate_intervals, FitnessReport, FitnessWeights, HourSet, MeetingInterval,
    ScheduleSignature,
};

/// Signature plus the week it stands for, sorted on the week axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScoreKey {
    unwanted: HourSet,
    weights: FitnessWeights,
    signature: ScheduleSignature,
    intervals: Vec<MeetingInterval>,
}

/// A [`Scorer`] that remembers reports by schedule signature and meeting times.
///
/// Two catalogs may reuse an id for options meeting at different times; the
/// key carries the flattened intervals so such schedules never share a report.
pub struct FitnessMemo {
    scores: Mutex<LruStore<ScoreKey, FitnessReport>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FitnessMemo {
    pub fn new(eviction: Eviction) -> Self {
        Self {
            scores: Mutex::new(LruStore::new(eviction)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Lookups answered from the memo.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Reports computed from scratch.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.scores.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.lock().is_empty()
    }

    pub fn clear(&self) {
        self.scores.lock().clear();
    }
}

impl Scorer for FitnessMemo {
    fn score(
        &self,
        signature: ScheduleSignature,
        options: &[&CourseOption],
        unwanted: HourSet,
        weights: &FitnessWeights,
    ) -> FitnessReport {
        let mut intervals = flatten_intervals(options.iter().copied());
        intervals.sort_unstable_by_key(|iv| (iv.week_start(), iv.week_end()));
        let key = ScoreKey {
            unwanted,
            weights: *weights,
            signature,
            intervals,
        };
        if let Some(report) = self.scores.lock().get(&key).copied() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return report;
        }

        // Computed outside the lock; racing threads may both compute a key.
        self.misses.fetch_add(1, Ordering::Relaxed);
        let report = evaluate_intervals(&key.intervals, unwanted, weights);
        self.scores.lock().insert(key, report);
        report
    }
}

//! Memoized searches.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::fingerprint::Fingerprint;
use super::memo::FitnessMemo;
use super::store::{Eviction, LruStore};
use crate::catalog::OfferingCatalog;
use crate::error::SearchError;
use crate::search::{SearchConfig, SearchOutcome, TimetableSolver};

/// Default number of remembered searches.
pub const DEFAULT_SEARCH_CAPACITY: usize = 64;

/// Default number of remembered fitness reports.
pub const DEFAULT_SCORE_CAPACITY: usize = 65_536;

type Slot = Arc<Mutex<Option<Arc<SearchOutcome>>>>;

struct Searches {
    finished: LruStore<Fingerprint, Arc<SearchOutcome>>,
    /// One slot per search being computed; waiters block on its lock.
    in_flight: HashMap<Fingerprint, Slot>,
}

enum Lookup {
    Finished(Arc<SearchOutcome>),
    InFlight(Slot),
}

/// Unregisters an in-flight slot when its computation ends, whatever the exit.
struct Claim<'a> {
    searches: &'a Mutex<Searches>,
    fingerprint: &'a Fingerprint,
    slot: &'a Slot,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        let mut searches = self.searches.lock();
        if searches
            .in_flight
            .get(self.fingerprint)
            .is_some_and(|slot| Arc::ptr_eq(slot, self.slot))
        {
            searches.in_flight.remove(self.fingerprint);
        }
    }
}

/// Counters and sizes of a [`SearchCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub search_hits: u64,
    pub search_misses: u64,
    pub cached_searches: usize,
    pub evicted_searches: u64,
    pub fitness_hits: u64,
    /// Fitness evaluations computed from scratch.
    pub fitness_misses: u64,
    pub cached_scores: usize,
}

/// Search front end that memoizes whole searches and individual scores.
///
/// Identical requests (same [`Fingerprint`]) return the same
/// `Arc<SearchOutcome>`. Concurrent callers with the same fingerprint wait
/// on one computation. Cancelled or failed searches are returned but never
/// stored, and never displace a finished entry.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_timetable::cache::SearchCache;
/// use u_timetable::catalog::{CourseOption, MeetingRecord, OfferingCatalog, SectionCombination};
/// use u_timetable::search::SearchConfig;
///
/// let lecture = CourseOption::new("10001", "COMP 1405 A")
///     .with_meeting(MeetingRecord::new(["Tue", "Thu"], "10:05-11:25"));
/// let catalog = OfferingCatalog::new()
///     .with_offering("COMP 1405", vec![SectionCombination::LectureOnly(lecture)]);
/// let config = SearchConfig::default()
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_return_size(1);
///
/// let cache = SearchCache::new();
/// let first = cache.search(&catalog, &config).unwrap();
/// let second = cache.search(&catalog, &config).unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct SearchCache {
    searches: Mutex<Searches>,
    memo: FitnessMemo,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchCache {
    /// LRU-bounded cache with the default capacities.
    pub fn new() -> Self {
        Self::with_eviction(
            Eviction::lru(DEFAULT_SEARCH_CAPACITY),
            Eviction::lru(DEFAULT_SCORE_CAPACITY),
        )
    }

    pub fn with_eviction(searches: Eviction, scores: Eviction) -> Self {
        Self {
            searches: Mutex::new(Searches {
                finished: LruStore::new(searches),
                in_flight: HashMap::new(),
            }),
            memo: FitnessMemo::new(scores),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn search(
        &self,
        catalog: &OfferingCatalog,
        config: &SearchConfig,
    ) -> Result<Arc<SearchOutcome>, SearchError> {
        self.search_with_cancel(catalog, config, None)
    }

    /// Cached search with an optional cancellation token.
    ///
    /// A cached outcome is returned without looking at `cancel`.
    pub fn search_with_cancel(
        &self,
        catalog: &OfferingCatalog,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Arc<SearchOutcome>, SearchError> {
        config.validate()?;

        let fingerprint = Fingerprint::of(catalog, config);
        loop {
            let slot = match self.lookup(&fingerprint) {
                Lookup::Finished(outcome) => return Ok(self.hit(outcome)),
                Lookup::InFlight(slot) => slot,
            };
            let mut pending = slot.lock();
            if let Some(outcome) = pending.as_ref() {
                return Ok(self.hit(Arc::clone(outcome)));
            }
            if !self.is_registered(&fingerprint, &slot) {
                // The computation we waited on was abandoned.
                continue;
            }
            let _claim = Claim {
                searches: &self.searches,
                fingerprint: &fingerprint,
                slot: &slot,
            };

            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("search cache miss");
            let outcome = Arc::new(TimetableSolver::run_with(
                catalog,
                config,
                &self.memo,
                cancel.clone(),
            )?);
            if !outcome.cancelled {
                *pending = Some(Arc::clone(&outcome));
                self.searches
                    .lock()
                    .finished
                    .insert(fingerprint.clone(), Arc::clone(&outcome));
            }
            return Ok(outcome);
        }
    }

    fn hit(&self, outcome: Arc<SearchOutcome>) -> Arc<SearchOutcome> {
        self.hits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("search cache hit");
        outcome
    }

    /// A finished outcome, or the in-flight slot for a fingerprint (created
    /// empty if missing).
    fn lookup(&self, fingerprint: &Fingerprint) -> Lookup {
        let mut searches = self.searches.lock();
        if let Some(outcome) = searches.finished.get(fingerprint) {
            return Lookup::Finished(Arc::clone(outcome));
        }
        Lookup::InFlight(Arc::clone(
            searches.in_flight.entry(fingerprint.clone()).or_default(),
        ))
    }

    fn is_registered(&self, fingerprint: &Fingerprint, slot: &Slot) -> bool {
        self.searches
            .lock()
            .in_flight
            .get(fingerprint)
            .is_some_and(|registered| Arc::ptr_eq(registered, slot))
    }

    /// The fitness memo shared by every search through this cache.
    pub fn fitness_memo(&self) -> &FitnessMemo {
        &self.memo
    }

    pub fn stats(&self) -> CacheStats {
        let searches = self.searches.lock();
        CacheStats {
            search_hits: self.hits.load(Ordering::Relaxed),
            search_misses: self.misses.load(Ordering::Relaxed),
            cached_searches: searches.finished.len(),
            evicted_searches: searches.finished.evicted(),
            fitness_hits: self.memo.hits(),
            fitness_misses: self.memo.misses(),
            cached_scores: self.memo.len(),
        }
    }

    /// Drops every cached search and score. Counters keep running.
    pub fn clear(&self) {
        self.searches.lock().finished.clear();
        self.memo.clear();
    }
}

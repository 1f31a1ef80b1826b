//! Conflict and fitness evaluation.
//!
//! A schedule is scored from its flattened [`MeetingInterval`]s:
//!
//! | Quantity             | Effect on score                 |
//! |----------------------|---------------------------------|
//! | `conflicts`          | `-conflict` weight each         |
//! | `unwanted_hour_hits` | `-unwanted_hour` weight each    |
//! | `days_off`           | `+day_off` weight each          |
//! | `idle_minutes`       | `-idle_minute` weight each      |
//!
//! Higher scores are better. The two hard-ish terms are weighted so that
//! one fewer conflict (or unwanted-hour hit) always outranks any change in
//! days off or idle time; [`FitnessWeights::validate`] enforces this.
//!
//! Evaluation is a pure function of the interval multiset and the unwanted
//! hours, so results can be memoized by schedule signature.

use super::interval::{MeetingInterval, MINUTES_PER_DAY, WEEKDAY_COUNT};
use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of hours of the day (0–23), stored as a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HourSet(u32);

impl HourSet {
    pub fn empty() -> Self {
        Self(0)
    }

    /// Builds a set, rejecting hours above 23.
    pub fn from_hours<I: IntoIterator<Item = u8>>(hours: I) -> Result<Self, ConfigError> {
        let mut set = Self::empty();
        for h in hours {
            set.insert(h)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, hour: u8) -> Result<(), ConfigError> {
        if hour > 23 {
            return Err(ConfigError::HourOutOfRange(hour));
        }
        self.0 |= 1 << hour;
        Ok(())
    }

    pub fn contains(&self, hour: u8) -> bool {
        hour <= 23 && self.0 & (1 << hour) != 0
    }

    /// Hours in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..24).filter(move |&h| self.contains(h))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Raw mask, bit `h` set for hour `h`.
    pub fn bits(&self) -> u32 {
        self.0
    }
}

/// Score weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitnessWeights {
    pub conflict: u32,
    pub unwanted_hour: u32,
    pub day_off: u32,
    pub idle_minute: u32,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            conflict: 100_000,
            unwanted_hour: 100_000,
            day_off: 100,
            idle_minute: 1,
        }
    }
}

impl FitnessWeights {
    /// Largest score difference the secondary terms can produce.
    ///
    /// Five days off, or a full day of idle time on every weekday.
    pub fn secondary_span(&self) -> i64 {
        WEEKDAY_COUNT as i64 * i64::from(self.day_off)
            + WEEKDAY_COUNT as i64 * i64::from(MINUTES_PER_DAY) * i64::from(self.idle_minute)
    }

    /// Checks that conflicts and unwanted hours strictly dominate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = self.secondary_span();
        if i64::from(self.conflict) <= required || i64::from(self.unwanted_hour) <= required {
            return Err(ConfigError::WeightsNotDominant { required });
        }
        Ok(())
    }
}

/// Evaluation of one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitnessReport {
    pub conflicts: u32,
    pub unwanted_hour_hits: u32,
    pub days_off: u8,
    pub idle_minutes: u32,
    /// Weighted total; higher is better.
    pub score: i64,
}

impl FitnessReport {
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts == 0
    }
}

/// Scores a set of intervals. Order of `intervals` does not matter.
pub fn evaluate_intervals(
    intervals: &[MeetingInterval],
    unwanted: HourSet,
    weights: &FitnessWeights,
) -> FitnessReport {
    let mut sorted = intervals.to_vec();
    sort_by_week(&mut sorted);

    let conflicts = count_sorted_conflicts(&sorted);
    let idle_minutes = sorted_idle_minutes(&sorted);
    let days_off = days_off(&sorted);
    let unwanted_hour_hits = unwanted_hour_hits(&sorted, unwanted);

    let score = -(i64::from(weights.conflict) * i64::from(conflicts))
        - i64::from(weights.unwanted_hour) * i64::from(unwanted_hour_hits)
        + i64::from(weights.day_off) * i64::from(days_off)
        - i64::from(weights.idle_minute) * i64::from(idle_minutes);

    FitnessReport {
        conflicts,
        unwanted_hour_hits,
        days_off,
        idle_minutes,
        score,
    }
}

/// Number of intervals that start before an earlier one has ended.
///
/// Sort-and-sweep with a running end watermark, so an interval overlapping
/// any number of earlier ones counts once, and long intervals spanning
/// several shorter ones are caught.
pub fn count_conflicts(intervals: &[MeetingInterval]) -> u32 {
    let mut sorted = intervals.to_vec();
    sort_by_week(&mut sorted);
    count_sorted_conflicts(&sorted)
}

/// Weekdays with no meeting at all.
pub fn days_off(intervals: &[MeetingInterval]) -> u8 {
    let mut busy = [false; WEEKDAY_COUNT];
    for interval in intervals {
        busy[interval.day().index()] = true;
    }
    busy.iter().filter(|&&b| !b).count() as u8
}

/// Total gap time between consecutive meetings on the same day.
pub fn idle_minutes(intervals: &[MeetingInterval]) -> u32 {
    let mut sorted = intervals.to_vec();
    sort_by_week(&mut sorted);
    sorted_idle_minutes(&sorted)
}

/// Pairs of (interval, unwanted hour) with the hour inside
/// `start_hour..=end_hour`.
pub fn unwanted_hour_hits(intervals: &[MeetingInterval], unwanted: HourSet) -> u32 {
    if unwanted.is_empty() {
        return 0;
    }
    intervals
        .iter()
        .map(|interval| {
            (interval.start_hour()..=interval.end_hour())
                .filter(|&h| unwanted.contains(h))
                .count() as u32
        })
        .sum()
}

fn sort_by_week(intervals: &mut [MeetingInterval]) {
    intervals.sort_by_key(|i| (i.week_start(), i.week_end()));
}

fn count_sorted_conflicts(sorted: &[MeetingInterval]) -> u32 {
    let mut conflicts = 0;
    let mut watermark = 0u32;
    for interval in sorted {
        if interval.week_start() < watermark {
            conflicts += 1;
        }
        watermark = watermark.max(interval.week_end());
    }
    conflicts
}

fn sorted_idle_minutes(sorted: &[MeetingInterval]) -> u32 {
    let mut idle = 0;
    let mut current: Option<(usize, u32)> = None;
    for interval in sorted {
        let day = interval.day().index();
        match current {
            Some((d, watermark)) if d == day => {
                idle += interval.week_start().saturating_sub(watermark);
                current = Some((d, watermark.max(interval.week_end())));
            }
            _ => current = Some((day, interval.week_end())),
        }
    }
    idle
}

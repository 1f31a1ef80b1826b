//! Meeting records to normalized time intervals.
//!
//! A [`MeetingRecord`] lists weekday tokens and one `"HH:MM-HH:MM"` range.
//! Each (record, weekday) pair becomes one [`MeetingInterval`]. Anything
//! unreadable (bad clock values, unknown weekday tokens, empty ranges) is
//! skipped on its own; the rest of the record still converts.

use crate::catalog::{CourseOption, MeetingRecord};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minutes in a day; the stride between weekdays on the week axis.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Number of teaching days considered (Monday–Friday).
pub const WEEKDAY_COUNT: usize = 5;

/// Teaching weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    pub const ALL: [Weekday; WEEKDAY_COUNT] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Zero-based index, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses a catalog weekday token.
    ///
    /// Accepts three-letter abbreviations and full English names in any
    /// case. Weekend days and anything else return `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let t = token.trim().to_ascii_lowercase();
        match t.as_str() {
            "mon" | "monday" => Some(Weekday::Mon),
            "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
            "wed" | "wednesday" => Some(Weekday::Wed),
            "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
            "fri" | "friday" => Some(Weekday::Fri),
            _ => None,
        }
    }
}

/// One meeting on one weekday, in minutes since midnight.
///
/// Invariant: `start < end <= 1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeetingInterval {
    day: Weekday,
    start: u16,
    end: u16,
}

impl MeetingInterval {
    /// Creates an interval, or `None` if the range is empty or leaves the day.
    pub fn new(day: Weekday, start: u16, end: u16) -> Option<Self> {
        if start < end && u32::from(end) <= MINUTES_PER_DAY {
            Some(Self { day, start, end })
        } else {
            None
        }
    }

    /// Converts one raw record, one interval per recognized weekday.
    pub fn from_record(record: &MeetingRecord) -> Vec<MeetingInterval> {
        let Some((start, end)) = parse_time_range(&record.time) else {
            if !record.has_no_days() {
                tracing::trace!(time = %record.time, "skipping meeting with unreadable time");
            }
            return Vec::new();
        };

        record
            .days
            .iter()
            .filter_map(|token| {
                let day = Weekday::parse(token);
                if day.is_none() && !token.trim().is_empty() {
                    tracing::trace!(token = %token, "skipping unknown weekday token");
                }
                day
            })
            .filter_map(|day| MeetingInterval::new(day, start, end))
            .collect()
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    /// Start, minutes since midnight.
    pub fn start_minute(&self) -> u16 {
        self.start
    }

    /// End, minutes since midnight.
    pub fn end_minute(&self) -> u16 {
        self.end
    }

    /// Start on the week axis: `day_index * 1440 + start_minute`.
    pub fn week_start(&self) -> u32 {
        self.day.index() as u32 * MINUTES_PER_DAY + u32::from(self.start)
    }

    /// End on the week axis.
    pub fn week_end(&self) -> u32 {
        self.day.index() as u32 * MINUTES_PER_DAY + u32::from(self.end)
    }

    pub fn start_hour(&self) -> u8 {
        (self.start / 60) as u8
    }

    pub fn end_hour(&self) -> u8 {
        (self.end / 60) as u8
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }
}

/// All intervals of one course option.
pub fn intervals_of(option: &CourseOption) -> Vec<MeetingInterval> {
    option
        .meetings
        .iter()
        .flat_map(MeetingInterval::from_record)
        .collect()
}

/// Parses `"HH:MM"` into minutes since midnight.
pub fn parse_clock(s: &str) -> Option<u16> {
    let (h, m) = s.trim().split_once(':')?;
    let h: u16 = h.trim().parse().ok()?;
    let m: u16 = m.trim().parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Parses `"HH:MM-HH:MM"` (spaces around the dash allowed).
///
/// Returns `None` unless both clocks parse and the end is after the start.
pub fn parse_time_range(s: &str) -> Option<(u16, u16)> {
    let (start, end) = s.split_once('-')?;
    let start = parse_clock(start)?;
    let end = parse_clock(end)?;
    (start < end).then_some((start, end))
}

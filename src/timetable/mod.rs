//! Timetable evaluation.
//!
//! - [`interval`]: meeting records → [`MeetingInterval`]s
//! - [`schedule`]: [`Schedule`] values, flattening, and [`ScheduleSignature`]
//! - [`fitness`]: conflicts, days off, idle time, unwanted hours → [`FitnessReport`]

pub mod fitness;
pub mod interval;
pub mod schedule;

pub use fitness::{evaluate_intervals, FitnessReport, FitnessWeights, HourSet};
pub use interval::{MeetingInterval, Weekday};
pub use schedule::{Schedule, ScheduleSignature};

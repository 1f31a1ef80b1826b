//! Schedules and their flattened forms.
//!
//! A [`Schedule`] maps each offering to one chosen [`SectionCombination`].
//! For evaluation it is flattened twice: first to the chosen
//! [`CourseOption`]s (lecture, then tutorial), then to
//! [`MeetingInterval`]s.

use std::collections::BTreeMap;
use std::fmt;

use super::fitness::{evaluate_intervals, FitnessReport, FitnessWeights, HourSet};
use super::interval::{intervals_of, MeetingInterval};
use crate::catalog::{CourseOption, SectionCombination};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical identity of a schedule: its chosen course ids, sorted.
///
/// Two schedules with equal signatures contain the same sections and score
/// identically, whichever offering order or pairing produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleSignature(Vec<String>);

impl ScheduleSignature {
    pub fn from_options<'a, I>(options: I) -> Self
    where
        I: IntoIterator<Item = &'a CourseOption>,
    {
        let mut ids: Vec<String> = options.into_iter().map(|o| o.id.clone()).collect();
        ids.sort_unstable();
        Self(ids)
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ScheduleSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// Chosen options of a set of combinations, lecture before tutorial.
pub fn flatten_combinations<'a, I>(combos: I) -> Vec<&'a CourseOption>
where
    I: IntoIterator<Item = &'a SectionCombination>,
{
    combos
        .into_iter()
        .flat_map(SectionCombination::options)
        .collect()
}

/// Meeting intervals of a set of options.
pub fn flatten_intervals<'a, I>(options: I) -> Vec<MeetingInterval>
where
    I: IntoIterator<Item = &'a CourseOption>,
{
    options.into_iter().flat_map(intervals_of).collect()
}

/// A full assignment of offering → chosen combination, with its evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    picks: BTreeMap<String, SectionCombination>,
    report: FitnessReport,
}

impl Schedule {
    /// Scores a set of picks and wraps them as a schedule.
    pub fn evaluate(
        picks: BTreeMap<String, SectionCombination>,
        unwanted: HourSet,
        weights: &FitnessWeights,
    ) -> Self {
        let intervals = flatten_intervals(flatten_combinations(picks.values()));
        let report = evaluate_intervals(&intervals, unwanted, weights);
        Self { picks, report }
    }

    pub(crate) fn with_report(
        picks: BTreeMap<String, SectionCombination>,
        report: FitnessReport,
    ) -> Self {
        Self { picks, report }
    }

    /// The combination chosen for an offering.
    pub fn get(&self, offering: &str) -> Option<&SectionCombination> {
        self.picks.get(offering)
    }

    /// Offering name and chosen combination, ordered by offering name.
    pub fn picks(&self) -> impl Iterator<Item = (&str, &SectionCombination)> {
        self.picks.iter().map(|(name, combo)| (name.as_str(), combo))
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn report(&self) -> &FitnessReport {
        &self.report
    }

    /// Every chosen option.
    pub fn course_options(&self) -> Vec<&CourseOption> {
        flatten_combinations(self.picks.values())
    }

    /// Every meeting interval of every chosen option.
    pub fn intervals(&self) -> Vec<MeetingInterval> {
        flatten_intervals(self.course_options())
    }

    pub fn signature(&self) -> ScheduleSignature {
        ScheduleSignature::from_options(self.course_options())
    }

    /// Course ids to register for, sorted and de-duplicated.
    pub fn registration_ids(&self) -> Vec<String> {
        let mut ids = self.signature().0;
        ids.dedup();
        ids
    }
}

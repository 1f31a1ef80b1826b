//! Timetable construction as a [`GaProblem`].
//!
//! # Encoding
//!
//! A [`Timetable`] holds one gene per schedulable offering: the index of the
//! chosen candidate in that offering's list. Offerings without candidates
//! are left out of the encoding entirely.

use std::collections::BTreeMap;

use rand::Rng;

use crate::catalog::{CourseOption, Offering, SectionCombination};
use crate::error::SearchError;
use crate::ga::{GaProblem, Individual};
use crate::timetable::fitness::{evaluate_intervals, FitnessReport, FitnessWeights, HourSet};
use crate::timetable::schedule::{flatten_intervals, Schedule, ScheduleSignature};

/// Computes the fitness of a chosen set of course options.
///
/// Implementations must return the same report for the same signature,
/// unwanted hours, and weights; memoizing scorers rely on it.
pub trait Scorer: Send + Sync {
    fn score(
        &self,
        signature: ScheduleSignature,
        options: &[&CourseOption],
        unwanted: HourSet,
        weights: &FitnessWeights,
    ) -> FitnessReport;
}

/// Scores every request from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectScorer;

impl Scorer for DirectScorer {
    fn score(
        &self,
        _signature: ScheduleSignature,
        options: &[&CourseOption],
        unwanted: HourSet,
        weights: &FitnessWeights,
    ) -> FitnessReport {
        let intervals = flatten_intervals(options.iter().copied());
        evaluate_intervals(&intervals, unwanted, weights)
    }
}

/// One candidate schedule in genome form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    /// Chosen candidate index per schedulable offering.
    pub genes: Vec<usize>,
    fitness: i64,
}

impl Timetable {
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: i64::MIN,
        }
    }
}

impl Individual for Timetable {
    type Fitness = i64;

    fn fitness(&self) -> i64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: i64) {
        self.fitness = fitness;
    }
}

/// The timetable problem over a fixed set of offerings.
pub struct TimetableProblem<'a, S: Scorer + ?Sized> {
    offerings: Vec<&'a Offering>,
    unwanted: HourSet,
    weights: FitnessWeights,
    scorer: &'a S,
}

impl<'a, S: Scorer + ?Sized> TimetableProblem<'a, S> {
    /// Creates a problem over `offerings`.
    ///
    /// Fails with [`SearchError::NoCandidates`] if an offering has nothing
    /// to choose from.
    pub fn new(
        offerings: Vec<&'a Offering>,
        unwanted: HourSet,
        weights: FitnessWeights,
        scorer: &'a S,
    ) -> Result<Self, SearchError> {
        if let Some(empty) = offerings.iter().find(|o| o.candidates.is_empty()) {
            return Err(SearchError::NoCandidates(empty.name.clone()));
        }
        Ok(Self {
            offerings,
            unwanted,
            weights,
            scorer,
        })
    }

    /// Chosen combinations. Genes that do not point at a candidate are
    /// skipped.
    pub fn chosen<'t>(
        &'t self,
        timetable: &'t Timetable,
    ) -> impl Iterator<Item = (&'a Offering, &'a SectionCombination)> + 't {
        self.offerings
            .iter()
            .zip(&timetable.genes)
            .filter_map(|(offering, &gene)| {
                let offering: &'a Offering = *offering;
                offering.candidates.get(gene).map(|combo| (offering, combo))
            })
    }

    /// Chosen course options, lecture before tutorial.
    pub fn options(&self, timetable: &Timetable) -> Vec<&'a CourseOption> {
        self.chosen(timetable)
            .flat_map(|(_, combo)| combo.options())
            .collect()
    }

    pub fn signature(&self, timetable: &Timetable) -> ScheduleSignature {
        ScheduleSignature::from_options(self.options(timetable))
    }

    /// Full evaluation of a timetable through the scorer.
    pub fn report(&self, timetable: &Timetable) -> FitnessReport {
        let options = self.options(timetable);
        let signature = ScheduleSignature::from_options(options.iter().copied());
        self.scorer
            .score(signature, &options, self.unwanted, &self.weights)
    }

    /// Evaluation from the meeting data itself, bypassing the scorer.
    pub fn rescore(&self, timetable: &Timetable) -> FitnessReport {
        let intervals = flatten_intervals(self.options(timetable));
        evaluate_intervals(&intervals, self.unwanted, &self.weights)
    }

    /// Materializes a timetable as a [`Schedule`].
    pub fn to_schedule(&self, timetable: &Timetable, report: FitnessReport) -> Schedule {
        let picks: BTreeMap<String, SectionCombination> = self
            .chosen(timetable)
            .map(|(offering, combo)| (offering.name.clone(), combo.clone()))
            .collect();
        Schedule::with_report(picks, report)
    }
}

impl<S: Scorer + ?Sized> GaProblem for TimetableProblem<'_, S> {
    type Individual = Timetable;
    type Key = ScheduleSignature;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Timetable {
        Timetable::new(
            self.offerings
                .iter()
                .map(|o| rng.random_range(0..o.candidates.len()))
                .collect(),
        )
    }

    fn evaluate(&self, timetable: &Timetable) -> i64 {
        self.report(timetable).score
    }

    /// Re-draws the choice of exactly one offering.
    fn mutate<R: Rng>(&self, timetable: &mut Timetable, rng: &mut R) {
        if self.offerings.is_empty() {
            return;
        }
        let locus = rng.random_range(0..self.offerings.len());
        timetable.genes[locus] = rng.random_range(0..self.offerings[locus].candidates.len());
    }

    fn key(&self, timetable: &Timetable) -> ScheduleSignature {
        self.signature(timetable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MeetingRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lecture(id: &str, days: &[&str], time: &str) -> SectionCombination {
        SectionCombination::LectureOnly(
            CourseOption::new(id, format!("TEST {id} A"))
                .with_meeting(MeetingRecord::new(days.iter().copied(), time)),
        )
    }

    fn offerings() -> Vec<Offering> {
        vec![
            Offering::new(
                "COMP 1405",
                vec![
                    lecture("A", &["Mon", "Wed"], "08:00-09:00"),
                    lecture("B", &["Tue", "Thu"], "10:00-11:00"),
                ],
            ),
            Offering::new("MATH 1104", vec![lecture("C", &["Mon", "Wed"], "08:30-09:30")]),
        ]
    }

    #[test]
    fn test_create_and_mutate_stay_in_range() {
        let offerings = offerings();
        let problem = TimetableProblem::new(
            offerings.iter().collect(),
            HourSet::empty(),
            FitnessWeights::default(),
            &DirectScorer,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let mut t = problem.create_individual(&mut rng);
            assert_eq!(t.genes.len(), 2);
            problem.mutate(&mut t, &mut rng);
            assert!(t.genes[0] < 2);
            assert_eq!(t.genes[1], 0);
        }
    }

    #[test]
    fn test_mutation_changes_at_most_one_locus() {
        let offerings = vec![
            Offering::new("X", (0..5).map(|i| lecture(&format!("x{i}"), &["Mon"], "08:00-09:00")).collect()),
            Offering::new("Y", (0..5).map(|i| lecture(&format!("y{i}"), &["Tue"], "08:00-09:00")).collect()),
            Offering::new("Z", (0..5).map(|i| lecture(&format!("z{i}"), &["Wed"], "08:00-09:00")).collect()),
        ];
        let problem = TimetableProblem::new(
            offerings.iter().collect(),
            HourSet::empty(),
            FitnessWeights::default(),
            &DirectScorer,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let before = problem.create_individual(&mut rng);
            let mut after = before.clone();
            problem.mutate(&mut after, &mut rng);
            let changed = before
                .genes
                .iter()
                .zip(&after.genes)
                .filter(|(a, b)| a != b)
                .count();
            assert!(changed <= 1);
        }
    }

    #[test]
    fn test_evaluate_conflicting_pair() {
        let offerings = offerings();
        let problem = TimetableProblem::new(
            offerings.iter().collect(),
            HourSet::empty(),
            FitnessWeights::default(),
            &DirectScorer,
        )
        .unwrap();
        let clash = Timetable::new(vec![0, 0]); // A + C
        let fine = Timetable::new(vec![1, 0]); // B + C
        assert_eq!(problem.report(&clash).conflicts, 2);
        assert_eq!(problem.report(&fine).conflicts, 0);
        assert!(problem.evaluate(&fine) > problem.evaluate(&clash));
        assert_eq!(problem.key(&fine).to_string(), "B,C");
    }

    #[test]
    fn test_out_of_range_gene_skipped() {
        let offerings = offerings();
        let problem = TimetableProblem::new(
            offerings.iter().collect(),
            HourSet::empty(),
            FitnessWeights::default(),
            &DirectScorer,
        )
        .unwrap();
        let broken = Timetable::new(vec![7, 0]);
        let schedule = problem.to_schedule(&broken, problem.report(&broken));
        assert_eq!(schedule.len(), 1);
        assert!(schedule.get("COMP 1405").is_none());
    }

    #[test]
    fn test_empty_offering_rejected() {
        let offerings = offerings();
        let empty = Offering::new("EMPTY", vec![]);
        let result = TimetableProblem::new(
            vec![&offerings[0], &empty],
            HourSet::empty(),
            FitnessWeights::default(),
            &DirectScorer,
        );
        assert!(matches!(
            result,
            Err(SearchError::NoCandidates(ref name)) if name == "EMPTY"
        ));
    }
}

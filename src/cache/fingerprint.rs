//! Canonical search keys.

use std::fmt::{self, Write};

use crate::catalog::OfferingCatalog;
use crate::search::SearchConfig;

/// Order-independent identity of a search request.
///
/// Built from the offering names, the full content of each offering's
/// candidates (ids, names and meetings; both sorted) and every configuration
/// value that changes the outcome. Two catalogs that differ only in offering
/// or candidate order share a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(catalog: &OfferingCatalog, config: &SearchConfig) -> Self {
        let mut offerings: Vec<(&str, Vec<String>)> = catalog
            .offerings()
            .iter()
            .map(|o| {
                let mut keys: Vec<String> = o.candidates.iter().map(|c| format!("{c:?}")).collect();
                keys.sort_unstable();
                (o.name.as_str(), keys)
            })
            .collect();
        offerings.sort_unstable();

        // Debug formatting quotes and escapes, so names cannot run together.
        let mut out = String::new();
        for (name, keys) in &offerings {
            let _ = write!(out, "{name:?}={keys:?};");
        }
        let ga = &config.ga;
        let _ = write!(
            out,
            "|pop={}|gens={}|ret={}|elite={:?}|sel={:?}|hours={:#x}|policy={:?}|w={:?}|seed={:?}",
            ga.population_size,
            ga.max_generations,
            config.return_size,
            ga.elite_ratio,
            ga.selection,
            config.unwanted_hours.bits(),
            config.unwanted_policy,
            config.weights,
            ga.seed,
        );
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CourseOption, MeetingRecord, Offering, SectionCombination};
    use crate::search::UnwantedHours;
    use crate::timetable::HourSet;
    use proptest::prelude::*;

    fn combo(id: &str) -> SectionCombination {
        SectionCombination::LectureOnly(CourseOption::new(id, format!("TEST {id} A")))
    }

    fn pair(lec: &str, tut: &str) -> SectionCombination {
        SectionCombination::LectureAndTutorial {
            lecture: CourseOption::new(lec, "TEST 1000 A"),
            tutorial: CourseOption::new(tut, "TEST 1000 A1"),
        }
    }

    fn offerings() -> Vec<Offering> {
        vec![
            Offering::new("COMP 1405", vec![combo("1"), combo("2"), pair("3", "4")]),
            Offering::new("MATH 1104", vec![combo("5")]),
            Offering::new("PHYS 1007", vec![pair("6", "7"), pair("6", "8")]),
            Offering::new("GHOST", vec![]),
        ]
    }

    #[test]
    fn test_config_changes_fingerprint() {
        let catalog: OfferingCatalog = offerings().into_iter().collect();
        let base = SearchConfig::default();
        let fp = Fingerprint::of(&catalog, &base);

        let variants = [
            base.clone().with_population_size(101),
            base.clone().with_max_generations(999),
            base.clone().with_return_size(9),
            base.clone().with_elite_ratio(0.2),
            base.clone().with_seed(1),
            base.clone().with_unwanted_hours(HourSet::from_hours([8]).unwrap()),
            base.clone().with_unwanted_policy(UnwantedHours::Exclude),
        ];
        for variant in &variants {
            assert_ne!(Fingerprint::of(&catalog, variant), fp);
        }

        // Parallelism does not change what a search returns.
        assert_eq!(Fingerprint::of(&catalog, &base.clone().with_parallel(false)), fp);
    }

    #[test]
    fn test_catalog_content_changes_fingerprint() {
        let config = SearchConfig::default();
        let a: OfferingCatalog = offerings().into_iter().collect();
        let mut b = offerings();
        b[1].candidates.push(combo("9"));
        let b: OfferingCatalog = b.into_iter().collect();
        assert_ne!(Fingerprint::of(&a, &config), Fingerprint::of(&b, &config));
    }

    #[test]
    fn test_meeting_times_change_fingerprint() {
        let config = SearchConfig::default();
        let at = |time: &str| {
            OfferingCatalog::new().with_offering(
                "COMP 1405",
                vec![SectionCombination::LectureOnly(
                    CourseOption::new("1", "COMP 1405 A")
                        .with_meeting(MeetingRecord::new(["Mon"], time)),
                )],
            )
        };
        assert_eq!(
            Fingerprint::of(&at("08:00-09:00"), &config),
            Fingerprint::of(&at("08:00-09:00"), &config)
        );
        assert_ne!(
            Fingerprint::of(&at("08:00-09:00"), &config),
            Fingerprint::of(&at("08:30-09:30"), &config)
        );
    }

    #[test]
    fn test_names_cannot_run_together() {
        let config = SearchConfig::default();
        let a = OfferingCatalog::new().with_offering("A;B", vec![combo("1")]);
        let b = OfferingCatalog::new()
            .with_offering("A", vec![])
            .with_offering("B", vec![combo("1")]);
        assert_ne!(Fingerprint::of(&a, &config), Fingerprint::of(&b, &config));
    }

    proptest! {
        #[test]
        fn prop_order_independent(
            offering_order in Just((0..4usize).collect::<Vec<_>>()).prop_shuffle(),
            candidate_seed in any::<u64>(),
        ) {
            let config = SearchConfig::default();
            let original: OfferingCatalog = offerings().into_iter().collect();

            let base = offerings();
            let shuffled: OfferingCatalog = offering_order
                .iter()
                .map(|&i| {
                    let mut o = base[i].clone();
                    if !o.candidates.is_empty() {
                        let len = o.candidates.len();
                        o.candidates.rotate_left((candidate_seed as usize) % len);
                    }
                    o
                })
                .collect();

            prop_assert_eq!(
                Fingerprint::of(&original, &config),
                Fingerprint::of(&shuffled, &config)
            );
        }
    }
}

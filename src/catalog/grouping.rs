//! Pairing raw course options into section combinations.
//!
//! Catalogs list lectures and tutorials separately. A tutorial may only be
//! taken with a lecture of the same section, and which section an option
//! belongs to is a catalog-specific convention. That convention is a
//! [`SectionKey`] supplied by the caller; [`SubjectCodeKey`] implements the
//! common "letter after the course number" rule.
//!
//! # Examples
//!
//! ```
//! use u_timetable::catalog::{group_sections, CourseOption, SubjectCodeKey};
//!
//! let options = vec![
//!     CourseOption::new("1", "COMP 1405 A").with_schedule_type("Lecture"),
//!     CourseOption::new("2", "COMP 1405 A1").with_schedule_type("Tutorial"),
//!     CourseOption::new("3", "COMP 1405 A2").with_schedule_type("Tutorial"),
//!     CourseOption::new("4", "COMP 1405 B").with_schedule_type("Lecture"),
//! ];
//! let combos = group_sections(&options, &SubjectCodeKey);
//! // A×{A1, A2} plus B alone
//! assert_eq!(combos.len(), 3);
//! ```

use super::types::{CourseOption, SectionCombination};

/// Key used when an option's section cannot be determined.
pub const DEFAULT_SECTION_KEY: &str = "$";

/// Assigns a course option to a section group.
///
/// Options with equal keys may be paired. Any `Fn(&CourseOption) -> String`
/// is a `SectionKey`.
pub trait SectionKey {
    fn section_key(&self, option: &CourseOption) -> String;
}

impl<F> SectionKey for F
where
    F: Fn(&CourseOption) -> String,
{
    fn section_key(&self, option: &CourseOption) -> String {
        self(option)
    }
}

/// Section key from the subject code: the leading letter of the third
/// whitespace-separated token (`"COMP 1405 A1"` → `"A"`).
///
/// Falls back to [`DEFAULT_SECTION_KEY`] when the token is missing or does
/// not start with a letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectCodeKey;

impl SectionKey for SubjectCodeKey {
    fn section_key(&self, option: &CourseOption) -> String {
        subject_code_section(&option.subject_code)
    }
}

/// See [`SubjectCodeKey`].
pub fn subject_code_section(subject_code: &str) -> String {
    subject_code
        .split_whitespace()
        .nth(2)
        .and_then(|token| token.chars().next())
        .filter(|c| c.is_alphabetic())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| DEFAULT_SECTION_KEY.to_string())
}

/// True for schedule types that accompany a lecture rather than stand alone.
pub fn is_tutorial_like(schedule_type: &str) -> bool {
    let t = schedule_type.trim().to_ascii_lowercase();
    t.starts_with("tut")
        || t.starts_with("lab")
        || t.starts_with("discussion")
        || t.starts_with("workshop")
}

/// Builds every valid pairing from a flat option list.
///
/// Within each section key, every lecture-like option is paired with every
/// tutorial-like option; a key with no tutorials yields lecture-only
/// combinations. Tutorials whose key has no lecture cannot be taken and are
/// dropped. Groups appear in first-seen order.
pub fn group_sections<K: SectionKey + ?Sized>(
    options: &[CourseOption],
    key: &K,
) -> Vec<SectionCombination> {
    let mut groups: Vec<(String, Vec<&CourseOption>, Vec<&CourseOption>)> = Vec::new();

    for option in options {
        let k = key.section_key(option);
        let idx = match groups.iter().position(|(g, _, _)| *g == k) {
            Some(idx) => idx,
            None => {
                groups.push((k, Vec::new(), Vec::new()));
                groups.len() - 1
            }
        };
        if is_tutorial_like(&option.schedule_type) {
            groups[idx].2.push(option);
        } else {
            groups[idx].1.push(option);
        }
    }

    let mut combos = Vec::new();
    for (section, lectures, tutorials) in groups {
        if lectures.is_empty() && !tutorials.is_empty() {
            tracing::trace!(section = %section, "dropping tutorials without a lecture");
        }
        for lecture in &lectures {
            if tutorials.is_empty() {
                combos.push(SectionCombination::LectureOnly((*lecture).clone()));
            } else {
                for tutorial in &tutorials {
                    combos.push(SectionCombination::LectureAndTutorial {
                        lecture: (*lecture).clone(),
                        tutorial: (*tutorial).clone(),
                    });
                }
            }
        }
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(id: &str, code: &str, kind: &str) -> CourseOption {
        CourseOption::new(id, code).with_schedule_type(kind)
    }

    #[test]
    fn test_subject_code_section() {
        assert_eq!(subject_code_section("COMP 1405 A"), "A");
        assert_eq!(subject_code_section("COMP 1405 b2"), "B");
        assert_eq!(subject_code_section("COMP 1405"), "$");
        assert_eq!(subject_code_section("COMP 1405 1A"), "$");
        assert_eq!(subject_code_section(""), "$");
    }

    #[test]
    fn test_tutorial_like() {
        assert!(is_tutorial_like("Tutorial"));
        assert!(is_tutorial_like("Laboratory"));
        assert!(is_tutorial_like(" discussion group"));
        assert!(!is_tutorial_like("Lecture"));
        assert!(!is_tutorial_like("Seminar"));
        assert!(!is_tutorial_like("Directed Studies"));
        assert!(!is_tutorial_like("Distance Learning"));
    }

    #[test]
    fn test_group_cartesian_within_section() {
        let options = vec![
            opt("1", "COMP 1405 A", "Lecture"),
            opt("2", "COMP 1405 A1", "Tutorial"),
            opt("3", "COMP 1405 A2", "Tutorial"),
            opt("4", "COMP 1405 B", "Lecture"),
            opt("5", "COMP 1405 B1", "Tutorial"),
        ];
        let combos = group_sections(&options, &SubjectCodeKey);
        let keys: Vec<String> = combos.iter().map(SectionCombination::key).collect();
        assert_eq!(keys, vec!["1+2", "1+3", "4+5"]);
    }

    #[test]
    fn test_group_lecture_only_and_orphan_tutorials() {
        let options = vec![
            opt("1", "MATH 1104 A", "Lecture"),
            opt("2", "MATH 1104 C1", "Tutorial"),
        ];
        let combos = group_sections(&options, &SubjectCodeKey);
        assert_eq!(combos.len(), 1);
        assert!(combos[0].tutorial().is_none());
    }

    #[test]
    fn test_custom_key_fn() {
        let options = vec![
            opt("1", "X", "Lecture"),
            opt("2", "Y", "Tutorial"),
        ];
        // Everything in one group.
        let same = |_: &CourseOption| "all".to_string();
        let combos = group_sections(&options, &same);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].key(), "1+2");
    }

    #[test]
    fn test_empty_input() {
        assert!(group_sections(&[], &SubjectCodeKey).is_empty());
    }
}

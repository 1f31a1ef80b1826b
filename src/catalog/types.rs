//! Catalog value types.
//!
//! Everything here is supplied by the caller and treated as read-only for
//! the duration of a search.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A raw meeting as listed by the catalog.
///
/// `days` holds weekday tokens (`"Mon"`, `"Tue"`, ...) and `time` a range
/// such as `"08:35-09:55"` or `"08:35 - 09:55"`. Neither is validated here;
/// conversion to intervals skips anything it cannot read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeetingRecord {
    pub days: Vec<String>,
    pub time: String,
}

impl MeetingRecord {
    /// Creates a meeting record.
    pub fn new<I, S>(days: I, time: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            days: days.into_iter().map(Into::into).collect(),
            time: time.into(),
        }
    }

    /// True when the record lists no usable weekday token at all.
    ///
    /// Online and asynchronous sections come through with an empty list or
    /// a single empty token.
    pub fn has_no_days(&self) -> bool {
        self.days.iter().all(|d| d.trim().is_empty())
    }
}

/// One concrete offered section (a lecture, tutorial, lab, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CourseOption {
    /// Unique identifier, typically the registration number (CRN).
    pub id: String,
    /// Subject code including the section, e.g. `"COMP 1405 A"`.
    pub subject_code: String,
    /// Human-readable course title.
    pub title: String,
    /// Catalog schedule type, e.g. `"Lecture"` or `"Tutorial"`.
    pub schedule_type: String,
    /// Instructor name, when listed.
    pub instructor: Option<String>,
    /// Weekly meetings.
    pub meetings: Vec<MeetingRecord>,
}

impl CourseOption {
    /// Creates a course option with no meetings and empty display metadata.
    pub fn new(id: impl Into<String>, subject_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject_code: subject_code.into(),
            title: String::new(),
            schedule_type: String::new(),
            instructor: None,
            meetings: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the schedule type.
    pub fn with_schedule_type(mut self, schedule_type: impl Into<String>) -> Self {
        self.schedule_type = schedule_type.into();
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    /// Adds a meeting.
    pub fn with_meeting(mut self, meeting: MeetingRecord) -> Self {
        self.meetings.push(meeting);
        self
    }

    /// True when no meeting has a weekday (online/asynchronous section).
    pub fn is_online_only(&self) -> bool {
        self.meetings.iter().all(MeetingRecord::has_no_days)
    }
}

/// One valid pairing for an offering: a lecture plus an optional tutorial.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SectionCombination {
    LectureOnly(CourseOption),
    LectureAndTutorial {
        lecture: CourseOption,
        tutorial: CourseOption,
    },
}

impl SectionCombination {
    /// The lecture-like option.
    pub fn lecture(&self) -> &CourseOption {
        match self {
            SectionCombination::LectureOnly(lecture) => lecture,
            SectionCombination::LectureAndTutorial { lecture, .. } => lecture,
        }
    }

    /// The tutorial-like option, if this pairing has one.
    pub fn tutorial(&self) -> Option<&CourseOption> {
        match self {
            SectionCombination::LectureOnly(_) => None,
            SectionCombination::LectureAndTutorial { tutorial, .. } => Some(tutorial),
        }
    }

    /// Lecture first, then the tutorial if present.
    pub fn options(&self) -> impl Iterator<Item = &CourseOption> {
        std::iter::once(self.lecture()).chain(self.tutorial())
    }

    /// Identifier of this pairing: `lecture` or `lecture+tutorial`.
    pub fn key(&self) -> String {
        match self.tutorial() {
            Some(tutorial) => format!("{}+{}", self.lecture().id, tutorial.id),
            None => self.lecture().id.clone(),
        }
    }
}

/// A course the student wants, with every pairing they could register for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offering {
    pub name: String,
    pub candidates: Vec<SectionCombination>,
}

impl Offering {
    /// Creates an offering.
    pub fn new(name: impl Into<String>, candidates: Vec<SectionCombination>) -> Self {
        Self {
            name: name.into(),
            candidates,
        }
    }

    /// True when no candidate option meets on any weekday.
    pub fn is_online_only(&self) -> bool {
        self.candidates
            .iter()
            .flat_map(SectionCombination::options)
            .all(CourseOption::is_online_only)
    }
}

/// Offering name → candidate pairings, in caller order.
///
/// Inserting an offering whose name already exists replaces its candidates,
/// so a catalog never holds two entries for one offering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OfferingCatalog {
    offerings: Vec<Offering>,
}

impl OfferingCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an offering.
    pub fn insert(&mut self, name: impl Into<String>, candidates: Vec<SectionCombination>) {
        let name = name.into();
        match self.offerings.iter_mut().find(|o| o.name == name) {
            Some(existing) => existing.candidates = candidates,
            None => self.offerings.push(Offering::new(name, candidates)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_offering(
        mut self,
        name: impl Into<String>,
        candidates: Vec<SectionCombination>,
    ) -> Self {
        self.insert(name, candidates);
        self
    }

    /// Looks up an offering's candidates by name.
    pub fn get(&self, name: &str) -> Option<&[SectionCombination]> {
        self.offerings
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.candidates.as_slice())
    }

    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }
}

impl FromIterator<Offering> for OfferingCatalog {
    fn from_iter<T: IntoIterator<Item = Offering>>(iter: T) -> Self {
        let mut catalog = OfferingCatalog::new();
        for offering in iter {
            catalog.insert(offering.name, offering.candidates);
        }
        catalog
    }
}

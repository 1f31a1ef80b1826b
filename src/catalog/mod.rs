//! Course catalog model.
//!
//! The catalog is produced by an external search collaborator and handed to
//! the optimizer as an [`OfferingCatalog`]: for each wanted course
//! ([`Offering`]), the list of [`SectionCombination`]s the student could
//! register for.
//!
//! [`group_sections`] is the seam where raw listings become combinations.
//! The section-matching rule is pluggable through [`SectionKey`].

mod grouping;
mod types;

pub use grouping::{
    group_sections, is_tutorial_like, subject_code_section, SectionKey, SubjectCodeKey,
    DEFAULT_SECTION_KEY,
};
pub use types::{CourseOption, MeetingRecord, Offering, OfferingCatalog, SectionCombination};

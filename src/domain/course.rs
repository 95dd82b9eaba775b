use std::collections::BTreeMap;

use serde::Serialize;

use super::{credits::CreditBreakdown, prerequisites::PrerequisiteExpression, section::Section};

/// A course as listed in the offering report, with its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferedCourse {
    /// Six digit course code.
    pub code: String,
    /// Course name, title-cased.
    pub name: String,
    /// The cost centres that list the course, in order of first appearance.
    pub departments: Vec<String>,
    /// Credit load.
    pub credits: CreditBreakdown,
    /// Courses required before enrolment.
    pub prerequisites: PrerequisiteExpression,
    /// Sections keyed by section code.
    pub sections: BTreeMap<String, Section>,
}

impl OfferedCourse {
    /// Folds a later listing of the same course into this one.
    ///
    /// Sections of the later listing are added, replacing sections with the
    /// same code. The later prerequisites replace the earlier ones. Name and
    /// credits keep their first value.
    pub fn merge(&mut self, later: Self) {
        for department in later.departments {
            if !self.departments.contains(&department) {
                self.departments.push(department);
            }
        }
        self.prerequisites = later.prerequisites;
        self.sections.extend(later.sections);
    }

    /// Total seats offered over all sections.
    #[must_use]
    pub fn seats(&self) -> u32 {
        self.sections.values().map(|section| section.seats).sum()
    }
}

/// A course as listed in the course catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogCourse {
    /// Six digit course code.
    pub code: String,
    /// Course name, title-cased.
    pub name: String,
    /// Abbreviation of the academic unit offering the course.
    pub organ: String,
    /// Level of study, such as `GR` for undergraduate.
    pub level: String,
    /// Credit load.
    pub credits: CreditBreakdown,
    /// Courses required before enrolment.
    pub prerequisites: PrerequisiteExpression,
}

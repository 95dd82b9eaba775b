use std::collections::BTreeMap;

use serde::Serialize;

use super::{credits::CreditBreakdown, prerequisites::PrerequisiteExpression};

/// One period (semester) of a curriculum flow chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowPeriod {
    /// Position of the period in the curriculum, starting at 1.
    pub number: u32,
    /// Credits the curriculum expects in this period.
    pub credits: u32,
    /// Courses grouped by modality (`OBR`, `OPT`, ...) then keyed by code.
    pub courses: BTreeMap<String, BTreeMap<String, FlowCourse>>,
}

impl FlowPeriod {
    /// Creates a period with no courses.
    #[must_use]
    pub const fn new(number: u32, credits: u32) -> Self {
        Self {
            number,
            credits,
            courses: BTreeMap::new(),
        }
    }

    /// Adds a course under a modality, replacing a course with the same
    /// code in that modality.
    pub fn insert(&mut self, modality: impl Into<String>, course: FlowCourse) {
        self.courses
            .entry(modality.into())
            .or_default()
            .insert(course.code.clone(), course);
    }

    /// Folds a later listing of the same period into this one.
    pub fn merge(&mut self, later: Self) {
        self.credits = later.credits;
        for (modality, courses) in later.courses {
            self.courses.entry(modality).or_default().extend(courses);
        }
    }

    /// Iterates over every course of the period, with its modality.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlowCourse)> {
        self.courses.iter().flat_map(|(modality, courses)| {
            courses.values().map(move |course| (modality.as_str(), course))
        })
    }
}

/// A course placed in a flow chart period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowCourse {
    /// Abbreviation of the department offering the course.
    pub department: String,
    /// Six digit course code.
    pub code: String,
    /// Course name, title-cased.
    pub name: String,
    /// Credit load.
    pub credits: CreditBreakdown,
    /// Courses required before enrolment.
    pub prerequisites: PrerequisiteExpression,
}

//! Grades of a course by period and class (HEDIS).

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use super::{
    Error, Line, LineCursor, Merge, ParseOptions, Parsed, ReportKind,
    assemble::{Grammar, Transition, assemble},
    classify::{self, Classifier},
    extract::{captures, group, parse_field},
    preprocess,
};
use crate::domain::{ClassKey, Grade, GradeEntry, Period};

static GRADE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d\d/\d{3,}) +(\d{4}/\d+) +(\w+) +(\w\w) {2,}(.*?)\s*$")
        .expect("valid grade pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Registration;

impl classify::Role for Registration {
    fn name(self) -> &'static str {
        "grade"
    }
}

static CLASSIFIER: LazyLock<Classifier<Registration>> = LazyLock::new(|| {
    Classifier::new(ReportKind::GradeHistory).rule(Registration, 0, r"^\s*\d\d/\d{3,} +\d{4}/")
});

/// The grades of a course, keyed by class then by registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GradeHistory {
    /// Grades keyed by class then by registration.
    pub classes: BTreeMap<ClassKey, BTreeMap<String, GradeEntry>>,
}

impl GradeHistory {
    /// Number of grades over all classes.
    #[must_use]
    pub fn grade_count(&self) -> usize {
        self.classes.values().map(BTreeMap::len).sum()
    }

    /// The registrations of everyone who took the course in a period,
    /// whatever their grade.
    pub fn registrations_in(&self, period: Period) -> impl Iterator<Item = &str> {
        self.classes
            .iter()
            .filter(move |(key, _)| key.period == period)
            .flat_map(|(_, grades)| grades.keys().map(String::as_str))
    }

    /// The periods in which the course was taken, in order.
    #[must_use]
    pub fn periods(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = self.classes.keys().map(|key| key.period).collect();
        periods.dedup();
        periods
    }
}

impl Merge for GradeHistory {
    fn merge(&mut self, later: Self) {
        for (class, grades) in later.classes {
            self.classes.entry(class).or_default().extend(grades);
        }
    }
}

/// Parses the grade history of a course.
///
/// # Errors
///
/// Returns an error if a grade line does not have every field.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Parsed<GradeHistory>, Error> {
    let lines = preprocess(text, ReportKind::GradeHistory)?;
    let parsed = assemble(&mut HistoryGrammar, &lines, options.on_malformed_section)?;
    tracing::info!(
        "{} grades in {} classes",
        parsed.records.grade_count(),
        parsed.records.classes.len()
    );
    Ok(parsed)
}

struct Record {
    class: ClassKey,
    registration: String,
    entry: GradeEntry,
}

struct HistoryGrammar;

impl Grammar for HistoryGrammar {
    type Role = Registration;
    type Record = Record;
    type SubRecord = ();
    type Output = GradeHistory;

    const KIND: ReportKind = ReportKind::GradeHistory;

    fn classifier(&self) -> &Classifier<Registration> {
        &CLASSIFIER
    }

    fn transition(&self, _role: Registration) -> Transition {
        Transition::NewRecord
    }

    fn open_record(
        &mut self,
        _role: Registration,
        line: &Line<'_>,
        _cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Record, Error> {
        let caps = captures(Self::KIND, line, &GRADE, "a grade line")?;
        let period = parse_field(Self::KIND, line, group(&caps, 2), "a period")?;
        let grade: Grade = parse_field(Self::KIND, line, group(&caps, 4), "a grade")?;

        Ok(Record {
            class: ClassKey {
                period,
                class: group(&caps, 3).to_string(),
            },
            registration: group(&caps, 1).to_string(),
            entry: GradeEntry {
                name: group(&caps, 5).to_string(),
                grade,
            },
        })
    }

    fn seal_record(&mut self, output: &mut GradeHistory, record: Record) -> Result<(), Error> {
        output
            .classes
            .entry(record.class)
            .or_default()
            .insert(record.registration, record.entry);
        Ok(())
    }
}

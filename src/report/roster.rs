//! Students per degree track (ALUREL).
//!
//! One line per student: registration, name, entry period, entry form, track
//! code and track name.

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
use crate::domain::{DegreeTrack, Period, Student};

static STUDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d\d/\d{3,}) +(.*?) {2,}(\d+/\d+) {2,}(\w+) +(\d+) +(.*?)\s*$")
        .expect("valid student pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Registration;

impl classify::Role for Registration {
    fn name(self) -> &'static str {
        "student"
    }
}

static CLASSIFIER: LazyLock<Classifier<Registration>> = LazyLock::new(|| {
    Classifier::new(ReportKind::Roster).rule(Registration, 0, r"^\s*\d\d/\d{3,} ")
});

/// The degree tracks of a roster, keyed by track code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    /// Tracks keyed by code.
    pub tracks: BTreeMap<String, DegreeTrack>,
}

impl Roster {
    /// Number of students over all tracks.
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.tracks.values().map(DegreeTrack::len).sum()
    }

    /// Whether a registration belongs to any of the given tracks.
    ///
    /// An empty list of tracks stands for every track.
    #[must_use]
    pub fn enrols(&self, registration: &str, tracks: &[String]) -> bool {
        self.tracks
            .values()
            .filter(|track| tracks.is_empty() || tracks.contains(&track.code))
            .any(|track| track.contains(registration))
    }

    fn add(&mut self, track: DegreeTrack) {
        if let Some(existing) = self.tracks.get_mut(&track.code) {
            existing.merge(track);
        } else {
            self.tracks.insert(track.code.clone(), track);
        }
    }
}

impl Merge for Roster {
    fn merge(&mut self, later: Self) {
        for track in later.tracks.into_values() {
            self.add(track);
        }
    }
}

/// Parses a student roster.
///
/// # Errors
///
/// Returns an error if a student line does not have every field.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Parsed<Roster>, Error> {
    let lines = preprocess(text, ReportKind::Roster)?;
    let parsed = assemble(&mut RosterGrammar, &lines, options.on_malformed_section)?;
    tracing::info!(
        "{} students in {} tracks",
        parsed.records.student_count(),
        parsed.records.tracks.len()
    );
    Ok(parsed)
}

struct RosterGrammar;

impl Grammar for RosterGrammar {
    type Role = Registration;
    type Record = DegreeTrack;
    type SubRecord = ();
    type Output = Roster;

    const KIND: ReportKind = ReportKind::Roster;

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
    ) -> Result<DegreeTrack, Error> {
        let caps = captures(Self::KIND, line, &STUDENT, "a student line")?;
        let entry: Period = parse_field(Self::KIND, line, group(&caps, 3), "an entry period")?;

        let mut track = DegreeTrack::new(group(&caps, 5), group(&caps, 6));
        track.enrol(
            entry,
            Student {
                registration: group(&caps, 1).to_string(),
                name: group(&caps, 2).to_string(),
                entry_form: group(&caps, 4).to_string(),
            },
        );
        Ok(track)
    }

    fn seal_record(&mut self, output: &mut Roster, record: DegreeTrack) -> Result<(), Error> {
        output.add(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
Universidade de Brasília - Relação de Alunos
  Matrícula   Nome                     Ingresso  Forma       Opção
  14/0012345  ANA MARIA SOUZA          2014/1  Vestibular  1856  Ciência da Computação
  14/0054321  BRUNO COSTA              2014/1  PAS         1856  Ciência da Computação
  15/0011111  CARLA DIAS               2015/2  Vestibular  1856  Ciência da Computação
  14/0099999  DANIEL ALVES             2014/1  Transferência  1899  Engenharia de Computação
";

    #[test]
    fn students_are_grouped_by_track_and_entry() {
        let parsed = parse(REPORT, &ParseOptions::default()).unwrap();
        let roster = &parsed.records;

        assert_eq!(roster.tracks.len(), 2);
        assert_eq!(roster.student_count(), 4);

        let computing = &roster.tracks["1856"];
        assert_eq!(computing.name, "Ciência da Computação");
        assert_eq!(computing.students[&Period::new(2014, 1)].len(), 2);

        let ana = &computing.students[&Period::new(2014, 1)]["14/0012345"];
        assert_eq!(ana.name, "ANA MARIA SOUZA");
        assert_eq!(ana.entry_form, "Vestibular");
    }

    #[test]
    fn headings_are_ignored() {
        let parsed = parse(REPORT, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.summary.records, 4);
        assert_eq!(parsed.summary.ignored_lines, 2);
    }

    #[test]
    fn membership_can_be_restricted_to_tracks() {
        let roster = parse(REPORT, &ParseOptions::default()).unwrap().records;

        assert!(roster.enrols("14/0099999", &[]));
        assert!(roster.enrols("14/0099999", &["1899".to_string()]));
        assert!(!roster.enrols("14/0099999", &["1856".to_string()]));
        assert!(!roster.enrols("99/0000000", &[]));
    }

    #[test]
    fn rosters_merge_by_track() {
        let mut first = parse(REPORT, &ParseOptions::default()).unwrap();
        let second = parse(
            "  16/0000001  EDUARDO LIMA  2016/1  Vestibular  1856  Ciência da Computação\n",
            &ParseOptions::default(),
        )
        .unwrap();
        first.merge(second);

        assert_eq!(first.records.tracks["1856"].len(), 4);
        assert_eq!(first.summary.records, 5);
    }

    #[test]
    fn short_entry_year_is_a_field_error() {
        let text = "  14/0012345  ANA MARIA SOUZA  14/1  Vestibular  1856  Ciência da Computação\n";
        let error = parse(text, &ParseOptions::default()).unwrap_err();
        assert_eq!(
            error,
            Error::FieldExtraction {
                kind: ReportKind::Roster,
                line: 0,
                expected: "an entry period",
                found: "14/1".to_string(),
            }
        );
    }

    #[test]
    fn truncated_student_line_is_a_field_error() {
        let text = "  14/0012345  ANA MARIA SOUZA\n";
        let error = parse(text, &ParseOptions::default()).unwrap_err();
        assert!(matches!(error, Error::FieldExtraction { line: 0, .. }));
    }
}

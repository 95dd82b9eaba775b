//! Course offering listing (OFELST).
//!
//! The listing is grouped by cost centre. Each course is printed as a title
//! line, a credit line that may start the prerequisite list, further
//! prerequisite lines, and a table of sections:
//!
//! ```text
//! CIC    -  DEPARTAMENTO DE CIÊNCIA DA COMPUTAÇÃO
//!    Disciplina                                  Créditos
//!  113476      -  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES
//!    Créditos: 004  -   002   -   000  -   006    Pré-req: CIC-113034  OU
//!                                                      CIC-113042  E MAT-113093
//!    Turma  Descrição                Vagas Turno    Dia     Horário     Local
//!   A  PARA CALOUROS        40  Diurno   Segunda  08:00 09:50 PJC BT 012  JOAO DA SILVA
//!        DE COMPUTAÇÃO             Quarta  08:00 09:50 PJC BT 012
//! ```
//!
//! A section spans its marker line and any continuation lines below it,
//! which may extend the description, add meetings, or carry instructor
//! names, reservations (`group/seats`) and observation flags (`**`).

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use super::{
    Error, ExtractionMode, Line, LineCursor, Merge, ParseOptions, Parsed, ReportKind,
    assemble::{Grammar, Transition, assemble},
    classify::{self, Classifier},
    extract::{self, captures, group, parse_field},
    preprocess,
};
use crate::domain::{
    ClassMeeting, CreditBreakdown, OfferedCourse, PrerequisiteExpression, Section, Shift,
    TimeSlot, Weekday,
};

const DAYS: &str = "Segunda|Terça|Quarta|Quinta|Sexta|Sábado|Domingo";

/// Column where the annotation columns (instructor, reservation,
/// observation) start on a plain continuation line.
const TAIL_COLUMN: usize = 36;

/// Column where the description starts on a plain continuation line.
const DESCRIPTION_COLUMN: usize = 7;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid offering pattern")
}

static COST_CENTRE: LazyLock<Regex> = LazyLock::new(|| regex(r"^(\w+.*?)    -  (\w+.*?)\s*$"));
static CREDITS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(\d{3}) +- +(\d{3}) +- +(\d{3}) +- +(\d{3})"));
static PREREQUISITE: LazyLock<Regex> = LazyLock::new(|| regex(r"\w{3}-\d{6}.*$"));
static SECTION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^ +([A-Z]{1,3}) (.*?) (\d+) +(Diurno|Noturno|Ambos)(.*)$"));
static MEETING: LazyLock<Regex> =
    LazyLock::new(|| regex(&format!(r"^({DAYS}) +(\d\d:\d\d \d\d:\d\d)(.*)$")));
static CONTINUED_MEETING: LazyLock<Regex> =
    LazyLock::new(|| regex(&format!(r"^(.*?)\b({DAYS}) +(\d\d:\d\d \d\d:\d\d)(.*)$")));
static RESERVATION: LazyLock<Regex> = LazyLock::new(|| regex(r"^(.*)/(\d+)$"));
static OBSERVATION: LazyLock<Regex> = LazyLock::new(|| regex(r"^\*+$"));
static LOCATION_END: LazyLock<Regex> = LazyLock::new(|| regex(r"\s{2,}"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    CostCentre,
    Course,
    TableTitle,
    Section,
}

impl classify::Role for Role {
    fn name(self) -> &'static str {
        match self {
            Self::CostCentre => "cost centre",
            Self::Course => "course",
            Self::TableTitle => "section table title",
            Self::Section => "section",
        }
    }
}

static CLASSIFIER: LazyLock<Classifier<Role>> = LazyLock::new(|| {
    Classifier::new(ReportKind::Offering)
        .rule(Role::CostCentre, 0, COST_CENTRE.as_str())
        .rule(Role::Course, 1, r"^ .{10,14} -  \w+")
        .rule(Role::TableTitle, 2, r"^   Turma")
        .rule(
            Role::Section,
            2,
            r"^ {1,3}[A-Z]{1,3} .*?\d+ +(Diurno|Noturno|Ambos)",
        )
});

/// The courses of an offering listing, keyed by course code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Offering {
    /// Offered courses keyed by code.
    pub courses: BTreeMap<String, OfferedCourse>,
}

impl Offering {
    /// Number of sections over all courses.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.courses.values().map(|course| course.sections.len()).sum()
    }

    fn add(&mut self, course: OfferedCourse) {
        if let Some(existing) = self.courses.get_mut(&course.code) {
            existing.merge(course);
        } else {
            self.courses.insert(course.code.clone(), course);
        }
    }
}

impl Merge for Offering {
    fn merge(&mut self, later: Self) {
        for course in later.courses.into_values() {
            self.add(course);
        }
    }
}

/// Parses an offering listing.
///
/// A course listed under several cost centres is merged: its sections are
/// combined, later sections replacing earlier ones with the same code, and
/// the later prerequisite list replaces the earlier one.
///
/// # Errors
///
/// Returns an error if the page frame is missing, a course appears before
/// any cost centre, a course has no credit line, or a section's fields
/// cannot be read under [`MalformedSectionPolicy::Fail`](super::MalformedSectionPolicy::Fail).
pub fn parse(text: &str, options: &ParseOptions) -> Result<Parsed<Offering>, Error> {
    let lines = preprocess(text, ReportKind::Offering)?;
    let mut grammar = OfferingGrammar {
        extraction: options.extraction,
        cost_centre: None,
    };
    let parsed = assemble(&mut grammar, &lines, options.on_malformed_section)?;

    tracing::info!(
        "{} courses ({} sections) offered",
        parsed.records.courses.len(),
        parsed.records.section_count()
    );
    Ok(parsed)
}

struct CourseDraft {
    course: OfferedCourse,
    prerequisites: Vec<String>,
}

struct OfferingGrammar {
    extraction: ExtractionMode,
    cost_centre: Option<String>,
}

impl OfferingGrammar {
    fn meeting<'t>(
        line: &Line<'_>,
        day: &str,
        slot: &str,
        rest: &'t str,
    ) -> Result<(ClassMeeting, &'t str), Error> {
        let day: Weekday = parse_field(Self::KIND, line, day, "a weekday")?;
        let slot: TimeSlot = parse_field(Self::KIND, line, slot, "a time slot")?;
        let rest = rest.trim();
        let (location, tail) = LOCATION_END
            .find(rest)
            .map_or((rest, ""), |gap| (&rest[..gap.start()], &rest[gap.end()..]));

        let meeting = ClassMeeting {
            day,
            slot,
            location: location.to_string(),
        };
        Ok((meeting, tail))
    }

    /// Applies the annotation columns that follow the schedule.
    fn annotate(section: &mut Section, line: &Line<'_>, tail: &str) -> Result<(), Error> {
        for (_, fragment) in extract::columns(tail) {
            Self::annotate_fragment(section, line, fragment)?;
        }
        Ok(())
    }

    fn annotate_fragment(section: &mut Section, line: &Line<'_>, fragment: &str) -> Result<(), Error> {
        if let Some(reservation) = RESERVATION.captures(fragment) {
            let seats = parse_field(Self::KIND, line, group(&reservation, 2), "reserved seats")?;
            section.reserve(group(&reservation, 1), seats);
        } else if OBSERVATION.is_match(fragment) {
            section.observe(fragment);
        } else {
            section.add_instructor_fragment(fragment);
        }
        Ok(())
    }
}

impl Grammar for OfferingGrammar {
    type Role = Role;
    type Record = CourseDraft;
    type SubRecord = Section;
    type Output = Offering;

    const KIND: ReportKind = ReportKind::Offering;

    fn classifier(&self) -> &Classifier<Role> {
        &CLASSIFIER
    }

    fn transition(&self, role: Role) -> Transition {
        match role {
            Role::CostCentre => Transition::Context,
            Role::Course => Transition::NewRecord,
            Role::TableTitle => Transition::Ignore,
            Role::Section => Transition::NewSubRecord,
        }
    }

    fn enter_context(
        &mut self,
        _role: Role,
        line: &Line<'_>,
        cursor: &mut LineCursor<'_, '_>,
    ) -> Result<(), Error> {
        let caps = captures(Self::KIND, line, &COST_CENTRE, "a cost centre")?;
        let code = group(&caps, 1);
        tracing::debug!("cost centre {code} ({})", extract::title_case(group(&caps, 2)));
        self.cost_centre = Some(code.to_string());

        cursor.require_next("the column titles of the cost centre")?;
        Ok(())
    }

    fn open_record(
        &mut self,
        _role: Role,
        line: &Line<'_>,
        cursor: &mut LineCursor<'_, '_>,
    ) -> Result<CourseDraft, Error> {
        let Some(department) = self.cost_centre.clone() else {
            return Err(Error::malformed(
                Self::KIND,
                line.index,
                "course listed before any cost centre",
            ));
        };

        let (code, name) = line
            .text
            .split_once("  -  ")
            .map(|(code, name)| (code.trim(), name.trim()))
            .filter(|(code, _)| !code.is_empty())
            .ok_or_else(|| Error::field(Self::KIND, line.index, "a course code", line.text.trim()))?;

        let credit_line = cursor.require_next("the credit line")?;
        let caps = captures(Self::KIND, credit_line, &CREDITS, "four credit components")?;
        let component = |index| parse_field(Self::KIND, credit_line, group(&caps, index), "a credit component");
        let credits = CreditBreakdown::new(component(1)?, component(2)?, component(3)?, component(4)?);

        let mut prerequisites = Vec::new();
        if let Some(fragment) = PREREQUISITE.find(credit_line.text) {
            prerequisites.push(fragment.as_str().trim().to_string());
        }

        Ok(CourseDraft {
            course: OfferedCourse {
                code: code.to_string(),
                name: extract::title_case(name),
                departments: vec![department],
                credits,
                prerequisites: PrerequisiteExpression::default(),
                sections: BTreeMap::new(),
            },
            prerequisites,
        })
    }

    fn extend_record(&mut self, record: &mut CourseDraft, line: &Line<'_>) -> Result<bool, Error> {
        let Some(fragment) = PREREQUISITE.find(line.text) else {
            return Ok(false);
        };
        record.prerequisites.push(fragment.as_str().trim().to_string());
        Ok(true)
    }

    fn open_sub_record(
        &mut self,
        _record: &mut CourseDraft,
        _role: Role,
        line: &Line<'_>,
        _cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Section, Error> {
        let caps = captures(Self::KIND, line, &SECTION, "a section line")?;
        let seats = parse_field(Self::KIND, line, group(&caps, 3), "a seat count")?;
        let shift: Shift = parse_field(Self::KIND, line, group(&caps, 4), "a shift")?;
        let mut section = Section::new(group(&caps, 1), group(&caps, 2), seats, shift);

        let rest = group(&caps, 5);
        let tail = if let Some(meeting) = MEETING.captures(rest) {
            let (meeting, tail) =
                Self::meeting(line, group(&meeting, 1), group(&meeting, 2), group(&meeting, 3))?;
            section.add_meeting(meeting);
            tail
        } else {
            rest
        };
        Self::annotate(&mut section, line, tail)?;

        Ok(section)
    }

    fn extend_sub_record(&mut self, section: &mut Section, line: &Line<'_>) -> Result<bool, Error> {
        if let Some(caps) = CONTINUED_MEETING.captures(line.text) {
            section.append_description(group(&caps, 1));
            let (meeting, tail) =
                Self::meeting(line, group(&caps, 2), group(&caps, 3), group(&caps, 4))?;
            section.add_meeting(meeting);
            Self::annotate(section, line, tail)?;
            return Ok(true);
        }

        match self.extraction {
            ExtractionMode::Pattern => {
                for (column, fragment) in extract::columns(line.text) {
                    if column < TAIL_COLUMN {
                        section.append_description(fragment);
                    } else {
                        Self::annotate_fragment(section, line, fragment)?;
                    }
                }
            }
            ExtractionMode::Offset => {
                section.append_description(extract::slice(
                    line.text,
                    DESCRIPTION_COLUMN..TAIL_COLUMN,
                ));
                Self::annotate(section, line, extract::slice(line.text, TAIL_COLUMN..usize::MAX))?;
            }
        }
        Ok(true)
    }

    fn seal_sub_record(&mut self, record: &mut CourseDraft, section: Section) {
        record.course.sections.insert(section.code.clone(), section);
    }

    fn seal_record(&mut self, output: &mut Offering, record: CourseDraft) -> Result<(), Error> {
        let CourseDraft {
            mut course,
            prerequisites,
        } = record;
        course.prerequisites = PrerequisiteExpression::parse(&prerequisites.join(" "));
        output.add(course);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::report::MalformedSectionPolicy;

    const HEADER: &str = "\
Universidade de Brasília
Sistema de Graduação - SIGRA
Listagem de Oferta de Disciplinas
Período : 2016/1
";

    const FOOTER: &str = "\
 Observações :
   ** turma com reserva de vagas
   lstofelst
";

    const CIC: &str = "\
CIC    -  DEPARTAMENTO DE CIÊNCIA DA COMPUTAÇÃO
   Disciplina                                  Créditos
 113476      -  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES
   Créditos: 004  -   002   -   000  -   006    Pré-req: CIC-113034  OU
                                                     CIC-113042  E MAT-113093
   Turma  Descrição                Vagas Turno    Dia     Horário     Local        Professor
  A  PARA CALOUROS        40  Diurno   Segunda  08:00 09:50 PJC BT 012  JOAO DA SILVA
       DE COMPUTAÇÃO             Quarta  08:00 09:50 PJC BT 012  MARIA OLIVEIRA
                                                            SANTOS
  B  TURMA REGULAR        30  Noturno  Terça  19:00 20:40 ICC AT 101  CIC/10  **
 116301      -  INTRODUCAO AO DESENVOLVIMENTO DE JOGOS
   Créditos: 002  -   002   -   000  -   004
   Turma  Descrição                Vagas Turno    Dia     Horário     Local        Professor
  AB Intro to CS        40  Noturno
       VESPERTINA                Sexta  14:00 15:50 PAT AT 022
";

    const ENE: &str = "\
ENE    -  DEPARTAMENTO DE ENGENHARIA ELÉTRICA
   Disciplina                                  Créditos
 113476      -  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES
   Créditos: 004  -   002   -   000  -   006    Pré-req: MAT-113034
   Turma  Descrição                Vagas Turno    Dia     Horário     Local        Professor
  B  ENGENHARIAS          25  Diurno   Quinta  10:00 11:50 PJC BT 099  ANA PEREIRA
  C  ENGENHARIAS          20  Diurno   Sexta  10:00 11:50 PJC BT 099  ANA PEREIRA
";

    fn report(body: &str) -> String {
        format!("{HEADER}{body}{FOOTER}")
    }

    fn parse_text(text: &str) -> Result<Parsed<Offering>, Error> {
        parse(text, &ParseOptions::default())
    }

    #[test]
    fn parses_courses_with_credits_and_prerequisites() {
        let parsed = parse_text(&report(CIC)).unwrap();
        let course = &parsed.records.courses["113476"];

        assert_eq!(course.name, "Algoritmos E Programação De Computadores");
        assert_eq!(course.departments, vec!["CIC"]);
        assert_eq!(course.credits, CreditBreakdown::new(4, 2, 0, 6));
        assert_eq!(course.prerequisites.to_string(), "113034 OU 113042 E 113093");
        assert!(parsed.records.courses["116301"].prerequisites.is_empty());
    }

    #[test]
    fn three_line_section_keeps_meetings_and_instructors_in_order() {
        let parsed = parse_text(&report(CIC)).unwrap();
        let section = &parsed.records.courses["113476"].sections["A"];

        assert_eq!(section.description, "PARA CALOUROS DE COMPUTAÇÃO");
        assert_eq!(section.seats, 40);
        assert_eq!(section.shift, Shift::Day);
        let days: Vec<_> = section.schedule.meetings().iter().map(|m| m.day).collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Wednesday]);
        assert_eq!(section.schedule.meetings()[1].location, "PJC BT 012");
        assert_eq!(
            section.instructors,
            vec!["JOAO DA SILVA", "MARIA OLIVEIRA SANTOS"]
        );
    }

    #[test]
    fn meeting_line_and_instructor_line_add_to_the_open_section() {
        let body = "\
CIC    -  DEPARTAMENTO DE CIÊNCIA DA COMPUTAÇÃO
   Disciplina                                  Créditos
 113476      -  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES
   Créditos: 004  -   002   -   000  -   006
   Turma  Descrição                Vagas Turno    Dia     Horário     Local        Professor
  A  PARA CALOUROS        40  Diurno   Segunda  08:00 09:50 PJC BT 012  JOAO DA SILVA
                                 Quarta  08:00 09:50 PJC BT 012
                                                            MARIA OLIVEIRA
";
        let parsed = parse_text(&report(body)).unwrap();
        let section = &parsed.records.courses["113476"].sections["A"];

        assert_eq!(section.description, "PARA CALOUROS");
        let days: Vec<_> = section.schedule.meetings().iter().map(|m| m.day).collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Wednesday]);
        assert_eq!(section.instructors, vec!["JOAO DA SILVA", "MARIA OLIVEIRA"]);
        assert_eq!(parsed.summary.sub_records, 1);
    }

    #[test]
    fn reservations_and_observations_are_read_from_the_tail() {
        let parsed = parse_text(&report(CIC)).unwrap();
        let section = &parsed.records.courses["113476"].sections["B"];

        assert_eq!(section.shift, Shift::Night);
        assert_eq!(section.reservations.get("CIC"), Some(&10));
        assert_eq!(section.observations, vec!["**"]);
        assert!(section.instructors.is_empty());
        assert_eq!(section.schedule.meetings()[0].day, Weekday::Tuesday);
    }

    #[test]
    fn section_without_meetings_takes_them_from_continuations() {
        let parsed = parse_text(&report(CIC)).unwrap();
        let section = &parsed.records.courses["116301"].sections["AB"];

        assert_eq!(section.description, "Intro to CS VESPERTINA");
        assert_eq!(section.seats, 40);
        assert_eq!(section.shift, Shift::Night);
        assert_eq!(section.schedule.len(), 1);
        assert_eq!(section.schedule.meetings()[0].day, Weekday::Friday);
    }

    #[test]
    fn course_in_two_cost_centres_is_merged_later_wins() {
        let text = format!("{HEADER}{CIC}{FOOTER}{HEADER}{ENE}{FOOTER}");
        let parsed = parse_text(&text).unwrap();
        let course = &parsed.records.courses["113476"];

        assert_eq!(course.departments, vec!["CIC", "ENE"]);
        assert_eq!(course.sections.keys().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(course.sections["B"].seats, 25);
        assert_eq!(course.sections["B"].instructors, vec!["ANA PEREIRA"]);
        assert_eq!(course.prerequisites.to_string(), "113034");
        assert_eq!(parsed.summary.records, 3);
        assert_eq!(parsed.records.courses.len(), 2);
    }

    #[test]
    fn summary_counts_markers() {
        let parsed = parse_text(&report(CIC)).unwrap();
        assert_eq!(parsed.summary.records, 2);
        assert_eq!(parsed.summary.sub_records, 3);
        assert_eq!(parsed.summary.skipped_sub_records, 0);
        // the two section table titles
        assert_eq!(parsed.summary.ignored_lines, 2);
    }

    #[test]
    fn offset_mode_cuts_plain_continuations_at_fixed_columns() {
        let body = "\
CIC    -  DEPARTAMENTO DE CIÊNCIA DA COMPUTAÇÃO
   Disciplina
 113476      -  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES
   Créditos: 004  -   002   -   000  -   006
  A  PARA CALOUROS        40  Diurno   Segunda  08:00 09:50 PJC BT 012  JOAO DA SILVA
       DE COMPUTAÇÃO                    SOUZA
";
        let options = ParseOptions {
            extraction: ExtractionMode::Offset,
            ..ParseOptions::default()
        };
        let parsed = parse(&report(body), &options).unwrap();
        let section = &parsed.records.courses["113476"].sections["A"];

        assert_eq!(section.description, "PARA CALOUROS DE COMPUTAÇÃO");
        assert_eq!(section.instructors, vec!["JOAO DA SILVA SOUZA"]);
    }

    #[test]
    fn course_before_cost_centre_is_malformed() {
        let body = "\
 113476      -  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES
   Créditos: 004  -   002   -   000  -   006
";
        let error = parse_text(&report(body)).unwrap_err();
        assert!(matches!(error, Error::MalformedReport { line: 0, .. }));
    }

    #[test]
    fn course_without_credit_line_is_malformed() {
        let body = "\
CIC    -  DEPARTAMENTO DE CIÊNCIA DA COMPUTAÇÃO
   Disciplina
 113476      -  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES
";
        let error = parse_text(&report(body)).unwrap_err();
        assert!(matches!(error, Error::MalformedReport { line: 3, .. }));
    }

    #[test]
    fn unreadable_credits_point_at_the_credit_line() {
        let body = "\
CIC    -  DEPARTAMENTO DE CIÊNCIA DA COMPUTAÇÃO
   Disciplina
 113476      -  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES
   Créditos: 004  -   0X2   -   000  -   006
";
        let error = parse_text(&report(body)).unwrap_err();
        assert!(matches!(error, Error::FieldExtraction { line: 3, .. }));
    }

    const BAD_SECTION: &str = "\
CIC    -  DEPARTAMENTO DE CIÊNCIA DA COMPUTAÇÃO
   Disciplina
 113476      -  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES
   Créditos: 004  -   002   -   000  -   006
  A  PARA CALOUROS        40  Diurno   Segunda  08:00 09:50 PJC BT 012  JOAO DA SILVA
  B  TURMA EXTRA          30  Diurno   Segunda  25:00 26:50 PJC BT 012  ANA PEREIRA
                                                            SOUZA
  C  TURMA NOTURNA        20  Noturno  Terça  19:00 20:40 ICC AT 101  PAULO COSTA
";

    #[test]
    fn bad_section_fails_the_parse_by_default() {
        let error = parse_text(&report(BAD_SECTION)).unwrap_err();
        assert!(matches!(
            error,
            Error::FieldExtraction { line: 5, expected: "a time slot", .. }
        ));
    }

    #[test]
    fn lenient_policy_skips_only_the_bad_section() {
        let options = ParseOptions {
            on_malformed_section: MalformedSectionPolicy::Skip,
            ..ParseOptions::default()
        };
        let parsed = parse(&report(BAD_SECTION), &options).unwrap();
        let course = &parsed.records.courses["113476"];

        assert_eq!(course.sections.keys().collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(course.sections["A"].instructors, vec!["JOAO DA SILVA"]);
        assert_eq!(course.sections["C"].instructors, vec!["PAULO COSTA"]);
        assert_eq!(parsed.summary.skipped_sub_records, 1);
        assert_eq!(parsed.summary.sub_records, 2);
    }

    #[test_case("  AB Intro to CS        40  Noturno", "AB", "Intro to CS", 40, Shift::Night; "no schedule")]
    #[test_case("  C  LABORATÓRIO 2      15  Ambos", "C", "LABORATÓRIO 2", 15, Shift::Both; "digit in description")]
    #[test_case(" XYZ RESERVADA          5  Diurno   Sábado  08:00 11:50 FT", "XYZ", "RESERVADA", 5, Shift::Day; "three letter code")]
    fn section_marker_fields(line: &str, code: &str, description: &str, seats: u32, shift: Shift) {
        let body = format!(
            "CIC    -  DEPARTAMENTO\n   Disciplina\n 113476      -  ALGORITMOS\n   Créditos: 004  -   002   -   000  -   006\n{line}\n"
        );
        let parsed = parse_text(&report(&body)).unwrap();
        let section = &parsed.records.courses["113476"].sections[code];

        assert_eq!(section.description, description);
        assert_eq!(section.seats, seats);
        assert_eq!(section.shift, shift);
    }
}

//! Curriculum flow chart (FLULST).
//!
//! The chart is a list of periods. Each period line is followed by two lines
//! of column titles, then by one block per course: a line with the course's
//! position and modality, a line with its department, code and name, four
//! lines with one credit component each, and optionally lines of
//! prerequisite codes.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use super::{
    Error, Line, LineCursor, Merge, ParseOptions, Parsed, ReportKind,
    assemble::{Grammar, Transition, assemble},
    classify::{self, Classifier},
    extract::{captures, group, parse_field, title_case},
    preprocess,
};
use crate::domain::{CreditBreakdown, FlowCourse, FlowPeriod, PrerequisiteExpression};

static PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ +Período: +(\d{1,3}) +Número de Créditos: +(\d{1,3})\s*$")
        .expect("valid period pattern")
});
static MODALITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ +\d{1,3} + (\w{3}) +\w$").expect("valid modality pattern"));
static COURSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ +(\w{1,3})  +(\d{6})  +(\S.*?)\s*$").expect("valid course pattern")
});
static CREDIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{3})").expect("valid credit pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Period,
    Modality,
}

impl classify::Role for Role {
    fn name(self) -> &'static str {
        match self {
            Self::Period => "period",
            Self::Modality => "course modality",
        }
    }
}

static CLASSIFIER: LazyLock<Classifier<Role>> = LazyLock::new(|| {
    Classifier::new(ReportKind::Flow)
        .rule(Role::Period, 0, PERIOD.as_str())
        .rule(Role::Modality, 0, MODALITY.as_str())
});

/// The periods of a flow chart, keyed by period number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Flow {
    /// Periods keyed by number.
    pub periods: BTreeMap<u32, FlowPeriod>,
}

impl Flow {
    /// Number of course placements over all periods.
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.periods.values().map(|period| period.iter().count()).sum()
    }

    fn add(&mut self, period: FlowPeriod) {
        if let Some(existing) = self.periods.get_mut(&period.number) {
            existing.merge(period);
        } else {
            self.periods.insert(period.number, period);
        }
    }
}

impl Merge for Flow {
    fn merge(&mut self, later: Self) {
        for period in later.periods.into_values() {
            self.add(period);
        }
    }
}

/// Parses a curriculum flow chart.
///
/// # Errors
///
/// Returns an error if the page frame is missing, or a period or course
/// block ends before its fixed lines.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Parsed<Flow>, Error> {
    let lines = preprocess(text, ReportKind::Flow)?;
    let parsed = assemble(&mut FlowGrammar, &lines, options.on_malformed_section)?;
    tracing::info!(
        "{} periods with {} courses",
        parsed.records.periods.len(),
        parsed.records.course_count()
    );
    Ok(parsed)
}

struct Placement {
    modality: String,
    course: FlowCourse,
    prerequisites: Vec<String>,
}

struct FlowGrammar;

impl Grammar for FlowGrammar {
    type Role = Role;
    type Record = FlowPeriod;
    type SubRecord = Placement;
    type Output = Flow;

    const KIND: ReportKind = ReportKind::Flow;

    fn classifier(&self) -> &Classifier<Role> {
        &CLASSIFIER
    }

    fn transition(&self, role: Role) -> Transition {
        match role {
            Role::Period => Transition::NewRecord,
            Role::Modality => Transition::NewSubRecord,
        }
    }

    fn open_record(
        &mut self,
        _role: Role,
        line: &Line<'_>,
        cursor: &mut LineCursor<'_, '_>,
    ) -> Result<FlowPeriod, Error> {
        let caps = captures(Self::KIND, line, &PERIOD, "a period line")?;
        let number = parse_field(Self::KIND, line, group(&caps, 1), "a period number")?;
        let credits = parse_field(Self::KIND, line, group(&caps, 2), "a credit count")?;

        cursor.require_next("the period column titles")?;
        cursor.require_next("the period column titles")?;

        Ok(FlowPeriod::new(number, credits))
    }

    fn open_sub_record(
        &mut self,
        _record: &mut FlowPeriod,
        _role: Role,
        line: &Line<'_>,
        cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Placement, Error> {
        let modality = captures(Self::KIND, line, &MODALITY, "a course modality")?;

        let course_line = cursor.require_next("the course line")?;
        let course = captures(Self::KIND, course_line, &COURSE, "a course line")?;

        let mut components = [0; 4];
        for component in &mut components {
            let credit_line = cursor.require_next("a credit line")?;
            let caps = captures(Self::KIND, credit_line, &CREDIT, "a credit component")?;
            *component = parse_field(Self::KIND, credit_line, group(&caps, 1), "a credit component")?;
        }
        let [theory, practice, extension, study] = components;

        Ok(Placement {
            modality: group(&modality, 1).to_string(),
            course: FlowCourse {
                department: group(&course, 1).to_string(),
                code: group(&course, 2).to_string(),
                name: title_case(group(&course, 3)),
                credits: CreditBreakdown::new(theory, practice, extension, study),
                prerequisites: PrerequisiteExpression::default(),
            },
            prerequisites: Vec::new(),
        })
    }

    fn extend_sub_record(&mut self, sub_record: &mut Placement, line: &Line<'_>) -> Result<bool, Error> {
        sub_record.prerequisites.push(line.text.trim().to_string());
        Ok(true)
    }

    fn seal_sub_record(&mut self, record: &mut FlowPeriod, sub_record: Placement) {
        let Placement {
            modality,
            mut course,
            prerequisites,
        } = sub_record;
        course.prerequisites = PrerequisiteExpression::parse(&prerequisites.join(" "));
        record.insert(modality, course);
    }

    fn seal_record(&mut self, output: &mut Flow, record: FlowPeriod) -> Result<(), Error> {
        output.add(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MalformedSectionPolicy;

    const HEADER: &str = "Universidade de Brasília\nSistema de Graduação\nListagem de Fluxo de Curso - Dados Completos\n";
    const FOOTER: &str = "   ---------------------------------\n   lstflulst   Página 1\n";
    const TITLES: &str = "      Modalidade  Disciplina\n      Créditos\n";

    fn course(position: u32, modality: &str, line: &str, credits: [&str; 4]) -> String {
        let mut block = format!("     {position}   {modality}  D\n{line}\n");
        for credit in credits {
            block.push_str(&format!("     {credit}\n"));
        }
        block
    }

    fn report() -> String {
        [
            HEADER,
            "  Curso: 370 Ciência da Computação\n",
            "   Período:  1    Número de Créditos:  24\n",
            TITLES,
            &course(
                1,
                "OBR",
                "  CIC  113476  ALGORITMOS E PROGRAMAÇÃO DE COMPUTADORES",
                ["004", "002", "000", "006"],
            ),
            &course(2, "OBR", "  MAT  113034  CÁLCULO 1", ["004", "002", "000", "006"]),
            "                      113476 E 113042\n",
            "                      OU 116301\n",
            FOOTER,
            HEADER,
            "   Período:  2    Número de Créditos:  26\n",
            TITLES,
            &course(1, "OPT", "  CIC  116441  ENGENHARIA DE SOFTWARE", ["002", "002", "000", "004"]),
            FOOTER,
        ]
        .concat()
    }

    #[test]
    fn periods_hold_their_courses_by_modality() {
        let parsed = parse(&report(), &ParseOptions::default()).unwrap();
        let flow = &parsed.records;

        assert_eq!(flow.periods.len(), 2);
        assert_eq!(flow.periods[&1].credits, 24);
        assert_eq!(flow.periods[&1].courses["OBR"].len(), 2);
        assert_eq!(flow.periods[&2].courses["OPT"].len(), 1);
        assert_eq!(flow.course_count(), 3);

        let algorithms = &flow.periods[&1].courses["OBR"]["113476"];
        assert_eq!(algorithms.department, "CIC");
        assert_eq!(algorithms.name, "Algoritmos E Programação De Computadores");
        assert_eq!(algorithms.credits, CreditBreakdown::new(4, 2, 0, 6));
        assert!(algorithms.prerequisites.is_empty());
    }

    #[test]
    fn prerequisite_lines_follow_the_credits() {
        let parsed = parse(&report(), &ParseOptions::default()).unwrap();
        let calculus = &parsed.records.periods[&1].courses["OBR"]["113034"];
        assert_eq!(calculus.prerequisites.to_string(), "113476 E 113042 OU 116301");
    }

    #[test]
    fn preamble_is_ignored() {
        let parsed = parse(&report(), &ParseOptions::default()).unwrap();
        assert_eq!(parsed.summary.records, 2);
        assert_eq!(parsed.summary.sub_records, 3);
        assert_eq!(parsed.summary.ignored_lines, 1);
    }

    #[test]
    fn later_listing_of_a_period_is_merged() {
        let mut first = parse(&report(), &ParseOptions::default()).unwrap();
        let second = [
            HEADER,
            "   Período:  2    Número de Créditos:  28\n",
            TITLES,
            &course(1, "OPT", "  CIC  117889  TÉCNICAS DE PROGRAMAÇÃO 1", ["002", "002", "000", "004"]),
            FOOTER,
        ]
        .concat();
        first.merge(parse(&second, &ParseOptions::default()).unwrap());

        let period = &first.records.periods[&2];
        assert_eq!(period.credits, 28);
        assert_eq!(period.courses["OPT"].len(), 2);
        assert_eq!(first.summary.records, 3);
    }

    #[test]
    fn truncated_course_block_is_malformed() {
        let text = [
            HEADER,
            "   Período:  1    Número de Créditos:  24\n",
            TITLES,
            "     1   OBR  D\n  CIC  113476  ALGORITMOS\n     004\n     002\n     000\n",
            FOOTER,
        ]
        .concat();
        let error = parse(&text, &ParseOptions::default()).unwrap_err();
        assert!(matches!(error, Error::MalformedReport { line: 8, .. }));
    }

    #[test]
    fn bad_credit_line_can_be_skipped() {
        let text = [
            HEADER,
            "   Período:  1    Número de Créditos:  24\n",
            TITLES,
            &course(1, "OBR", "  CIC  113476  ALGORITMOS", ["004", "0X2", "000", "006"]),
            &course(2, "OBR", "  MAT  113034  CÁLCULO 1", ["004", "002", "000", "006"]),
            FOOTER,
        ]
        .concat();

        let error = parse(&text, &ParseOptions::default()).unwrap_err();
        assert!(matches!(error, Error::FieldExtraction { line: 6, .. }));

        let options = ParseOptions {
            on_malformed_section: MalformedSectionPolicy::Skip,
            ..ParseOptions::default()
        };
        let parsed = parse(&text, &options).unwrap();
        let period = &parsed.records.periods[&1];
        assert_eq!(period.courses["OBR"].keys().collect::<Vec<_>>(), vec!["113034"]);
        assert_eq!(parsed.summary.skipped_sub_records, 1);
    }
}

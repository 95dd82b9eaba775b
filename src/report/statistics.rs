//! Entry and exit statistics of a degree course (CUREGEP).
//!
//! A line with four period titles heads a table whose numbered rows hold,
//! for each period, the count of male and female students.

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
use crate::domain::{Period, SexCount};

const PERIODS_PER_TABLE: usize = 4;

static PERIODS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ +(\d{4}/\d) +(\d{4}/\d) +(\d{4}/\d) +(\d{4}/\d)\s*$")
        .expect("valid period titles pattern")
});
static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ +\d+  (.*?)  +(\d+) +(\d+) +(\d+) +(\d+) +(\d+) +(\d+) +(\d+) +(\d+)\s*$")
        .expect("valid statistic pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Periods,
    Row,
}

impl classify::Role for Role {
    fn name(self) -> &'static str {
        match self {
            Self::Periods => "period titles",
            Self::Row => "statistic",
        }
    }
}

static CLASSIFIER: LazyLock<Classifier<Role>> = LazyLock::new(|| {
    Classifier::new(ReportKind::EntryStatistics)
        .rule(Role::Periods, 0, PERIODS.as_str())
        .rule(Role::Row, 0, r"^ +\d+  \S.*\d\s*$")
});

/// Headcounts per period, keyed by period then by statistic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryStatistics {
    /// Counts keyed by period then by statistic name.
    pub periods: BTreeMap<Period, BTreeMap<String, SexCount>>,
}

impl Merge for EntryStatistics {
    fn merge(&mut self, later: Self) {
        for (period, counts) in later.periods {
            self.periods.entry(period).or_default().extend(counts);
        }
    }
}

/// Parses entry and exit statistics.
///
/// # Errors
///
/// Returns an error if the report has no line of period titles, or a
/// statistic row is out of place or has the wrong number of counts.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Parsed<EntryStatistics>, Error> {
    let lines = preprocess(text, ReportKind::EntryStatistics)?;
    let parsed = assemble(&mut StatisticsGrammar, &lines, options.on_malformed_section)?;
    if parsed.summary.records == 0 {
        return Err(Error::malformed(
            ReportKind::EntryStatistics,
            lines.len(),
            "no line of period titles",
        ));
    }
    tracing::info!("statistics of {} periods", parsed.records.periods.len());
    Ok(parsed)
}

struct Table {
    periods: [Period; PERIODS_PER_TABLE],
    rows: Vec<(String, [SexCount; PERIODS_PER_TABLE])>,
}

struct StatisticsGrammar;

impl Grammar for StatisticsGrammar {
    type Role = Role;
    type Record = Table;
    type SubRecord = (String, [SexCount; PERIODS_PER_TABLE]);
    type Output = EntryStatistics;

    const KIND: ReportKind = ReportKind::EntryStatistics;

    fn classifier(&self) -> &Classifier<Role> {
        &CLASSIFIER
    }

    fn transition(&self, role: Role) -> Transition {
        match role {
            Role::Periods => Transition::NewRecord,
            Role::Row => Transition::NewSubRecord,
        }
    }

    fn open_record(
        &mut self,
        _role: Role,
        line: &Line<'_>,
        _cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Table, Error> {
        let caps = captures(Self::KIND, line, &PERIODS, "four period titles")?;
        let mut periods = [Period::new(0, 0); PERIODS_PER_TABLE];
        for (index, period) in periods.iter_mut().enumerate() {
            *period = parse_field(Self::KIND, line, group(&caps, index + 1), "a period")?;
        }
        Ok(Table {
            periods,
            rows: Vec::new(),
        })
    }

    fn open_sub_record(
        &mut self,
        _record: &mut Table,
        _role: Role,
        line: &Line<'_>,
        _cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Self::SubRecord, Error> {
        let caps = captures(Self::KIND, line, &ROW, "a statistic with eight counts")?;
        let count = |index| parse_field(Self::KIND, line, group(&caps, index), "a headcount");

        let mut counts = [SexCount::default(); PERIODS_PER_TABLE];
        for (index, sexes) in counts.iter_mut().enumerate() {
            let column = 2 + 2 * index;
            *sexes = SexCount::new(count(column)?, count(column + 1)?);
        }
        Ok((group(&caps, 1).to_string(), counts))
    }

    fn seal_sub_record(&mut self, record: &mut Table, sub_record: Self::SubRecord) {
        record.rows.push(sub_record);
    }

    fn seal_record(&mut self, output: &mut EntryStatistics, record: Table) -> Result<(), Error> {
        for (index, period) in record.periods.into_iter().enumerate() {
            let counts = output.periods.entry(period).or_default();
            for (name, sexes) in &record.rows {
                counts.insert(name.clone(), sexes[index]);
            }
        }
        Ok(())
    }
}

//! Course catalog (DISLST).
//!
//! Each course takes a listing line with the organ, level, name, credits and
//! status, a line with the course code and the wrapped end of the name, and
//! any number of prerequisite tokens printed one per line far to the right.

use std::{collections::BTreeMap, convert::Infallible, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use super::{
    Error, Line, LineCursor, Merge, ParseOptions, Parsed, ReportKind,
    assemble::{Grammar, Transition, assemble},
    classify::{self, Classifier},
    extract::{captures, group, parse_field, title_case},
    preprocess,
};
use crate::domain::{CatalogCourse, CreditBreakdown, PrerequisiteExpression};

static LISTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^ +([A-Z]{1,5}) +([A-Z]{2,})  +(.*?)  +(.*?)  +(\d{3}) +(\d{3}) +(\d{3}) +(\d{3}) +(.*)$",
    )
    .expect("valid listing pattern")
});
static CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{6})(.*)").expect("valid code pattern"));
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {100,}(\d{6}|E|OU)\s*$").expect("valid token pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Listing;

impl classify::Role for Listing {
    fn name(self) -> &'static str {
        "course listing"
    }
}

static CLASSIFIER: LazyLock<Classifier<Listing>> =
    LazyLock::new(|| Classifier::new(ReportKind::Catalog).rule(Listing, 0, LISTING.as_str()));

/// The courses of a catalog, keyed by course code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    /// Catalog entries keyed by code.
    pub courses: BTreeMap<String, CatalogCourse>,
}

impl Merge for Catalog {
    fn merge(&mut self, later: Self) {
        self.courses.extend(later.courses);
    }
}

/// Parses a course catalog.
///
/// Some courses are listed under more than one organ; only the last listing
/// is kept.
///
/// # Errors
///
/// Returns an error if the page frame is missing, or a listing is not
/// followed by its code line.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Parsed<Catalog>, Error> {
    let lines = preprocess(text, ReportKind::Catalog)?;
    let parsed = assemble(&mut CatalogGrammar, &lines, options.on_malformed_section)?;
    tracing::info!("{} courses listed", parsed.records.courses.len());
    Ok(parsed)
}

struct Draft {
    course: CatalogCourse,
    tokens: Vec<String>,
}

struct CatalogGrammar;

impl Grammar for CatalogGrammar {
    type Role = Listing;
    type Record = Draft;
    type SubRecord = Infallible;
    type Output = Catalog;

    const KIND: ReportKind = ReportKind::Catalog;

    fn classifier(&self) -> &Classifier<Listing> {
        &CLASSIFIER
    }

    fn transition(&self, _role: Listing) -> Transition {
        Transition::NewRecord
    }

    fn open_record(
        &mut self,
        _role: Listing,
        line: &Line<'_>,
        cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Draft, Error> {
        let caps = captures(Self::KIND, line, &LISTING, "a course listing")?;
        let component = |index| parse_field(Self::KIND, line, group(&caps, index), "a credit component");
        let credits = CreditBreakdown::new(component(5)?, component(6)?, component(7)?, component(8)?);

        let code_line = cursor.require_next("the course code line")?;
        let code = captures(Self::KIND, code_line, &CODE, "a course code")?;

        let mut name = title_case(group(&caps, 3));
        let name_end = group(&code, 2);
        if !name_end.is_empty() {
            name.push(' ');
            name.push_str(&title_case(name_end));
        }

        Ok(Draft {
            course: CatalogCourse {
                code: group(&code, 1).to_string(),
                name,
                organ: group(&caps, 1).to_string(),
                level: group(&caps, 2).to_string(),
                credits,
                prerequisites: PrerequisiteExpression::default(),
            },
            tokens: Vec::new(),
        })
    }

    fn extend_record(&mut self, record: &mut Draft, line: &Line<'_>) -> Result<bool, Error> {
        let Some(token) = TOKEN.captures(line.text) else {
            return Ok(false);
        };
        record.tokens.push(group(&token, 1).to_string());
        Ok(true)
    }

    fn seal_record(&mut self, output: &mut Catalog, record: Draft) -> Result<(), Error> {
        let Draft { mut course, tokens } = record;
        course.prerequisites = PrerequisiteExpression::parse(&tokens.join(" "));
        if output.courses.contains_key(&course.code) {
            tracing::debug!("course {} listed again under {}", course.code, course.organ);
        }
        output.courses.insert(course.code.clone(), course);
        Ok(())
    }
}

//! Parsing of SIGRA report exports.
//!
//! Every report goes through the same pipeline. The [`preprocess`] step strips
//! page headers and footers and yields the remaining non-blank [`Line`]s. A
//! per-report [`Classifier`](classify::Classifier) then labels each line, and
//! the shared [`assemble`](assemble::assemble) driver folds the labelled lines
//! into typed records using the report's [`Grammar`](assemble::Grammar).
//!
//! Each report kind has its own module exposing a `parse` function:
//!
//! ```
//! use sigra::report::{ParseOptions, roster};
//!
//! let text = "  14/0012345  ANA MARIA SOUZA  2014/1  Vestibular  1856  Ciência da Computação\n";
//! let roster = roster::parse(text, &ParseOptions::default()).unwrap();
//! assert_eq!(roster.summary.records, 1);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod assemble;
pub mod classify;
mod error;
pub mod extract;
mod layout;
mod line;
mod preprocess;

pub mod catalog;
pub mod contacts;
pub mod flow;
pub mod history;
pub mod offering;
pub mod roster;
pub mod statistics;

pub use assemble::{Parsed, Summary};
pub use error::Error;
pub use layout::{Block, Layout, ParseKindError, ReportKind};
pub use line::{Line, LineCursor};
pub use preprocess::preprocess;

use crate::source::{self, Encoding, LoadError};

/// What to do with a sub-record whose fields cannot be extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedSectionPolicy {
    /// Fail the whole parse.
    #[default]
    Fail,
    /// Drop the sub-record and its continuation lines, and carry on.
    Skip,
}

/// How plain continuation lines of the offering report are split into
/// description and annotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Split on runs of whitespace and sort fragments by column.
    #[default]
    Pattern,
    /// Cut at the fixed character offsets of the printed layout.
    Offset,
}

/// Settings shared by every report parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// What to do with a sub-record whose fields cannot be extracted.
    pub on_malformed_section: MalformedSectionPolicy,
    /// How plain continuation lines of the offering report are split.
    pub extraction: ExtractionMode,
}

/// Combines the output of two parses of the same report kind.
///
/// Used when a report is exported in several files, one per department or
/// per period. The later output takes precedence where both define the same
/// key.
pub trait Merge {
    /// Folds `later` into `self`.
    fn merge(&mut self, later: Self);
}

impl<T: Merge> Merge for Parsed<T> {
    fn merge(&mut self, later: Self) {
        self.records.merge(later.records);
        self.summary += later.summary;
    }
}

/// The raw text of an exported report, with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    kind: ReportKind,
    text: String,
}

impl Report {
    /// Wraps report text already in memory.
    #[must_use]
    pub fn new(kind: ReportKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Reads a report from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn load(path: &Path, kind: ReportKind, encoding: Encoding) -> Result<Self, LoadError> {
        let text = source::read_to_string(path, encoding)?;
        Ok(Self { kind, text })
    }

    /// The report kind.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        self.kind
    }

    /// The raw text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parses the report according to its kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not follow the layout of its kind.
    pub fn parse(&self, options: &ParseOptions) -> Result<ParsedReport, Error> {
        self.kind.parse(&self.text, options)
    }
}

/// The typed output of parsing a report of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsedReport {
    /// Output of [`offering::parse`].
    Offering(Parsed<offering::Offering>),
    /// Output of [`catalog::parse`].
    Catalog(Parsed<catalog::Catalog>),
    /// Output of [`flow::parse`].
    Flow(Parsed<flow::Flow>),
    /// Output of [`roster::parse`].
    Roster(Parsed<roster::Roster>),
    /// Output of [`contacts::parse`].
    Contacts(Parsed<contacts::Contacts>),
    /// Output of [`history::parse`].
    GradeHistory(Parsed<history::GradeHistory>),
    /// Output of [`statistics::parse`].
    EntryStatistics(Parsed<statistics::EntryStatistics>),
}

impl ParsedReport {
    /// The kind of report this was parsed from.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::Offering(_) => ReportKind::Offering,
            Self::Catalog(_) => ReportKind::Catalog,
            Self::Flow(_) => ReportKind::Flow,
            Self::Roster(_) => ReportKind::Roster,
            Self::Contacts(_) => ReportKind::Contacts,
            Self::GradeHistory(_) => ReportKind::GradeHistory,
            Self::EntryStatistics(_) => ReportKind::EntryStatistics,
        }
    }

    /// Record counts of the parse.
    #[must_use]
    pub const fn summary(&self) -> &Summary {
        match self {
            Self::Offering(parsed) => &parsed.summary,
            Self::Catalog(parsed) => &parsed.summary,
            Self::Flow(parsed) => &parsed.summary,
            Self::Roster(parsed) => &parsed.summary,
            Self::Contacts(parsed) => &parsed.summary,
            Self::GradeHistory(parsed) => &parsed.summary,
            Self::EntryStatistics(parsed) => &parsed.summary,
        }
    }
}

impl ReportKind {
    /// Parses report text of this kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not follow the layout of this kind.
    pub fn parse(self, text: &str, options: &ParseOptions) -> Result<ParsedReport, Error> {
        Ok(match self {
            Self::Offering => ParsedReport::Offering(offering::parse(text, options)?),
            Self::Catalog => ParsedReport::Catalog(catalog::parse(text, options)?),
            Self::Flow => ParsedReport::Flow(flow::parse(text, options)?),
            Self::Roster => ParsedReport::Roster(roster::parse(text, options)?),
            Self::Contacts => ParsedReport::Contacts(contacts::parse(text, options)?),
            Self::GradeHistory => ParsedReport::GradeHistory(history::parse(text, options)?),
            Self::EntryStatistics => {
                ParsedReport::EntryStatistics(statistics::parse(text, options)?)
            }
        })
    }
}

use super::ReportKind;

/// Errors that can occur when parsing a report.
///
/// Line numbers are zero-based indices into the cleaned line sequence, except
/// for header and footer errors, which point into the raw text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The report does not have the overall shape of its kind.
    #[error("malformed {kind} report at line {line}: {detail}")]
    MalformedReport {
        /// The kind of report being parsed.
        kind: ReportKind,
        /// Where the problem was found.
        line: usize,
        /// What is wrong.
        detail: String,
    },

    /// A line matches more than one role with the same priority.
    #[error("ambiguous line {line} in {kind} report: matches {}", .roles.join(", "))]
    AmbiguousLine {
        /// The kind of report being parsed.
        kind: ReportKind,
        /// The offending line.
        line: usize,
        /// The roles the line matches.
        roles: Vec<&'static str>,
    },

    /// A field of a recognised line could not be read.
    #[error("line {line} of {kind} report: expected {expected}, found '{found}'")]
    FieldExtraction {
        /// The kind of report being parsed.
        kind: ReportKind,
        /// The offending line.
        line: usize,
        /// What the field should have been.
        expected: &'static str,
        /// The text found instead.
        found: String,
    },
}

impl Error {
    /// The line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedReport { line, .. }
            | Self::AmbiguousLine { line, .. }
            | Self::FieldExtraction { line, .. } => *line,
        }
    }

    pub(crate) fn malformed(kind: ReportKind, line: usize, detail: impl Into<String>) -> Self {
        Self::MalformedReport {
            kind,
            line,
            detail: detail.into(),
        }
    }

    pub(crate) fn field(
        kind: ReportKind,
        line: usize,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::FieldExtraction {
            kind,
            line,
            expected,
            found: found.into(),
        }
    }
}

//! Cleaned report lines and the cursor the assembler reads them through.

use super::{Error, ReportKind};

/// A non-blank physical line of a report, after header and footer removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Zero-based position in the cleaned line sequence.
    pub index: usize,
    /// The line text, with internal whitespace preserved.
    pub text: &'a str,
}

impl<'a> Line<'a> {
    /// Creates a line.
    #[must_use]
    pub const fn new(index: usize, text: &'a str) -> Self {
        Self { index, text }
    }
}

/// A forward-only position over the cleaned lines of a report.
///
/// The assembler driver pulls lines from the cursor one at a time. Grammars
/// use the same cursor to consume the fixed follow-on lines of a marker,
/// such as the credit line below a course title.
#[derive(Debug)]
pub struct LineCursor<'l, 'a> {
    kind: ReportKind,
    lines: &'l [Line<'a>],
    position: usize,
}

impl<'l, 'a> LineCursor<'l, 'a> {
    /// Creates a cursor at the first line.
    #[must_use]
    pub const fn new(kind: ReportKind, lines: &'l [Line<'a>]) -> Self {
        Self {
            kind,
            lines,
            position: 0,
        }
    }

    /// Consumes a follow-on line that the layout requires.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedReport`] if the input ends first.
    pub fn require_next(&mut self, expected: &str) -> Result<&'l Line<'a>, Error> {
        let end = self.lines.last().map_or(0, |line| line.index + 1);
        self.next().ok_or_else(|| {
            Error::malformed(
                self.kind,
                end,
                format!("input ends where {expected} was expected"),
            )
        })
    }
}

impl<'l, 'a> Iterator for LineCursor<'l, 'a> {
    type Item = &'l Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.get(self.position)?;
        self.position += 1;
        Some(line)
    }
}

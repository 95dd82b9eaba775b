use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Serialize, Serializer};

/// The kinds of report this crate can parse.
///
/// Each kind is identified in SIGRA by the code of the screen that exports
/// it (`OFELST`, `DISLST`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportKind {
    /// Course offering listing with sections (OFELST).
    Offering,
    /// Course catalog (DISLST).
    Catalog,
    /// Curriculum flow chart (FLULST).
    Flow,
    /// Students per degree track and entry period (ALUREL).
    Roster,
    /// Student contact list (ALUTEL).
    Contacts,
    /// Grades of a course by period and class (HEDIS).
    GradeHistory,
    /// Entry and exit counts per period by sex (CUREGEP).
    EntryStatistics,
}

impl ReportKind {
    /// Every report kind.
    pub const ALL: [Self; 7] = [
        Self::Offering,
        Self::Catalog,
        Self::Flow,
        Self::Roster,
        Self::Contacts,
        Self::GradeHistory,
        Self::EntryStatistics,
    ];

    /// The SIGRA export code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Offering => "OFELST",
            Self::Catalog => "DISLST",
            Self::Flow => "FLULST",
            Self::Roster => "ALUREL",
            Self::Contacts => "ALUTEL",
            Self::GradeHistory => "HEDIS",
            Self::EntryStatistics => "CUREGEP",
        }
    }

    /// The page header and footer blocks of this kind.
    #[must_use]
    pub fn layout(self) -> &'static Layout {
        match self {
            Self::Offering => &OFFERING,
            Self::Catalog => &CATALOG,
            Self::Flow => &FLOW,
            Self::Roster
            | Self::Contacts
            | Self::GradeHistory
            | Self::EntryStatistics => &UNFRAMED,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned for an unknown export code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown report kind '{0}'")]
pub struct ParseKindError(String);

impl FromStr for ReportKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == upper)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

impl Serialize for ReportKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A block of lines delimited by a start anchor and an end anchor,
/// both inclusive.
#[derive(Debug)]
pub struct Block {
    start: Regex,
    end: Regex,
}

impl Block {
    /// Creates a block from its anchors.
    #[must_use]
    pub const fn new(start: Regex, end: Regex) -> Self {
        Self { start, end }
    }

    /// Whether a line opens the block.
    #[must_use]
    pub fn starts(&self, line: &str) -> bool {
        self.start.is_match(line)
    }

    /// Whether a line closes the block.
    #[must_use]
    pub fn ends(&self, line: &str) -> bool {
        self.end.is_match(line)
    }
}

/// The page furniture of a report kind.
///
/// Multi-page exports repeat the header and footer on every page; each
/// occurrence is removed before classification.
#[derive(Debug, Default)]
pub struct Layout {
    /// The page header, if the report has one.
    pub header: Option<Block>,
    /// The page footer, if the report has one.
    pub footer: Option<Block>,
}

fn block(start: &str, end: &str) -> Block {
    Block::new(
        Regex::new(start).expect("valid block start anchor"),
        Regex::new(end).expect("valid block end anchor"),
    )
}

static OFFERING: LazyLock<Layout> = LazyLock::new(|| Layout {
    header: Some(block(r"Universidade de Brasília", r"Período :.*\d{4}/\d")),
    footer: Some(block(r"^ Observações :", r"lstofelst")),
});

static CATALOG: LazyLock<Layout> = LazyLock::new(|| Layout {
    header: Some(block(r"Universidade de Brasília", r"Relação de Disciplinas")),
    footer: Some(block(r"^ +-{2,}\s*$", r"lstdislst")),
});

static FLOW: LazyLock<Layout> = LazyLock::new(|| Layout {
    header: Some(block(
        r"Universidade de Brasília",
        r"Listagem de Fluxo de Curso - Dados Completos",
    )),
    footer: Some(block(r"^ + -{5,}", r"lstflulst")),
});

static UNFRAMED: LazyLock<Layout> = LazyLock::new(Layout::default);

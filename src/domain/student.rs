//! Students, their contacts and their grades.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Serialize, Serializer};

use super::period::Period;

/// A student listed in a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    /// Registration number, `YY/NNNNNNN`.
    pub registration: String,
    /// Full name, as printed.
    pub name: String,
    /// How the student was admitted, such as `Vestibular` or `PAS`.
    pub entry_form: String,
}

/// A degree track (habilitação) and the students enrolled in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeTrack {
    /// Numeric track code.
    pub code: String,
    /// Track name.
    pub name: String,
    /// Students keyed by entry period, then by registration.
    pub students: BTreeMap<Period, BTreeMap<String, Student>>,
}

impl DegreeTrack {
    /// Creates a track with no students.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            students: BTreeMap::new(),
        }
    }

    /// Enrols a student admitted in `entry`.
    pub fn enrol(&mut self, entry: Period, student: Student) {
        self.students
            .entry(entry)
            .or_default()
            .insert(student.registration.clone(), student);
    }

    /// Folds a later listing of the same track into this one.
    pub fn merge(&mut self, later: Self) {
        for (entry, students) in later.students {
            self.students.entry(entry).or_default().extend(students);
        }
    }

    /// Whether a registration belongs to this track.
    #[must_use]
    pub fn contains(&self, registration: &str) -> bool {
        self.students
            .values()
            .any(|students| students.contains_key(registration))
    }

    /// Number of students over all entry periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.values().map(BTreeMap::len).sum()
    }

    /// Whether the track lists no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Contact details of a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Registration number.
    pub registration: String,
    /// Full name.
    pub name: String,
    /// Phone number, if the student registered one.
    pub phone: Option<String>,
    /// E-mail address, if the student registered one.
    pub email: Option<String>,
}

/// The final grade (menção) of a student in a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Grade {
    /// Superior.
    SS,
    /// Médio superior.
    MS,
    /// Médio.
    MM,
    /// Médio inferior.
    MI,
    /// Inferior.
    II,
    /// Sem rendimento.
    SR,
    /// Trancamento.
    TR,
    /// Trancamento justificado.
    TJ,
    /// Crédito concedido.
    CC,
    /// Dispensa.
    DP,
    /// Any other code printed by the report.
    Other(String),
}

impl Grade {
    /// Whether the grade approves the student in the course.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::SS | Self::MS | Self::MM | Self::CC)
    }

    /// The two letter code printed in the reports.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::SS => "SS",
            Self::MS => "MS",
            Self::MM => "MM",
            Self::MI => "MI",
            Self::II => "II",
            Self::SR => "SR",
            Self::TR => "TR",
            Self::TJ => "TJ",
            Self::CC => "CC",
            Self::DP => "DP",
            Self::Other(code) => code,
        }
    }
}

impl FromStr for Grade {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "SS" => Self::SS,
            "MS" => Self::MS,
            "MM" => Self::MM,
            "MI" => Self::MI,
            "II" => Self::II,
            "SR" => Self::SR,
            "TR" => Self::TR,
            "TJ" => Self::TJ,
            "CC" => Self::CC,
            "DP" => Self::DP,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A class of a course in a given period.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassKey {
    /// The academic term.
    pub period: Period,
    /// The section code.
    pub class: String,
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.period, self.class)
    }
}

impl Serialize for ClassKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A student's result in a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeEntry {
    /// Full name.
    pub name: String,
    /// Final grade.
    pub grade: Grade,
}

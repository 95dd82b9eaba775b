use std::{convert::Infallible, fmt, str::FromStr, sync::LazyLock};

use nonempty::NonEmpty;
use regex::Regex;
use serde::{Serialize, ser::SerializeSeq};

static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{6}").expect("valid course code pattern"));

/// The combinations of prior courses that make a student eligible to enrol.
///
/// The expression is a disjunction of alternatives, each alternative a
/// conjunction of course codes. For example the listing of course 116858
/// (Informática Aplicada a Educação) reads `116343 OU 125172 E 194531`:
/// approval in 116343, or in both 125172 and 194531.
///
/// An empty expression means the course has no prerequisites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PrerequisiteExpression {
    alternatives: Vec<NonEmpty<String>>,
}

impl PrerequisiteExpression {
    /// Builds an expression from groups of course codes, dropping empty
    /// groups.
    #[must_use]
    pub fn new<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = String>,
    {
        let alternatives = groups
            .into_iter()
            .filter_map(|group| NonEmpty::from_vec(group.into_iter().collect()))
            .collect();
        Self { alternatives }
    }

    /// Parses the flattened text of a prerequisite field.
    ///
    /// The text is split on the `OU` connective first, since it binds more
    /// loosely than `E`. Within each alternative every six-digit run is a
    /// course code, read left to right; anything else (the `E` connective,
    /// department prefixes, padding) is discarded. Alternatives with no
    /// codes are dropped.
    #[must_use]
    pub fn parse(flattened: &str) -> Self {
        Self::new(flattened.split("OU").map(|alternative| {
            COURSE_CODE
                .find_iter(alternative)
                .map(|code| code.as_str().to_string())
        }))
    }

    /// Whether the course has no prerequisites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// The alternatives, each a non-empty list of required course codes.
    #[must_use]
    pub fn alternatives(&self) -> &[NonEmpty<String>] {
        &self.alternatives
    }

    /// Every course code mentioned, in order of appearance.
    pub fn courses(&self) -> impl Iterator<Item = &str> {
        self.alternatives
            .iter()
            .flat_map(NonEmpty::iter)
            .map(String::as_str)
    }

    /// Evaluates the expression given a predicate telling whether a course
    /// was passed.
    ///
    /// An empty expression is always satisfied.
    pub fn is_satisfied_by<F>(&self, passed: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.is_empty()
            || self
                .alternatives
                .iter()
                .any(|group| group.iter().all(|code| passed(code)))
    }
}

impl FromStr for PrerequisiteExpression {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for PrerequisiteExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, " OU ")?;
            }
            for (j, code) in group.iter().enumerate() {
                if j > 0 {
                    write!(f, " E ")?;
                }
                write!(f, "{code}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for PrerequisiteExpression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.alternatives.len()))?;
        for group in &self.alternatives {
            seq.serialize_element(&group.iter().collect::<Vec<_>>())?;
        }
        seq.end()
    }
}

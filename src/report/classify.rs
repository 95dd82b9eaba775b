//! Prioritised line classification.

use std::fmt;

use regex::Regex;

use super::{Error, Line, ReportKind};

/// The structural role a line can play in a report.
pub trait Role: Copy + Eq + fmt::Debug {
    /// A short name for diagnostics.
    fn name(self) -> &'static str;
}

#[derive(Debug)]
struct Rule<R> {
    role: R,
    priority: u8,
    pattern: Regex,
}

/// An ordered set of line predicates for one report kind.
///
/// Every rule is tried on every line. When several rules match, the one with
/// the highest priority wins, which is how a more specific pattern takes
/// precedence over a looser one. A line matching no rule is a continuation of
/// whatever record is open.
#[derive(Debug)]
pub struct Classifier<R> {
    kind: ReportKind,
    rules: Vec<Rule<R>>,
}

impl<R: Role> Classifier<R> {
    /// Creates a classifier with no rules.
    #[must_use]
    pub const fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
        }
    }

    /// Adds a rule.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Patterns are
    /// fixed per report kind, so this is a programming error.
    #[must_use]
    pub fn rule(mut self, role: R, priority: u8, pattern: &str) -> Self {
        let pattern = Regex::new(pattern).expect("valid line pattern");
        self.rules.push(Rule {
            role,
            priority,
            pattern,
        });
        self
    }

    /// Classifies a line.
    ///
    /// Returns `None` for continuation lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousLine`] if rules for different roles match
    /// with the same, highest, priority.
    pub fn classify(&self, line: &Line<'_>) -> Result<Option<R>, Error> {
        let mut best: Option<u8> = None;
        let mut roles: Vec<R> = Vec::new();

        for rule in self.rules.iter().filter(|rule| rule.pattern.is_match(line.text)) {
            match best {
                Some(priority) if rule.priority < priority => {}
                Some(priority) if rule.priority == priority => {
                    if !roles.contains(&rule.role) {
                        roles.push(rule.role);
                    }
                }
                _ => {
                    best = Some(rule.priority);
                    roles = vec![rule.role];
                }
            }
        }

        match roles.as_slice() {
            [] => Ok(None),
            [role] => Ok(Some(*role)),
            _ => Err(Error::AmbiguousLine {
                kind: self.kind,
                line: line.index,
                roles: roles.iter().map(|role| role.name()).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Test {
        Word,
        Number,
        Code,
    }

    impl Role for Test {
        fn name(self) -> &'static str {
            match self {
                Self::Word => "word",
                Self::Number => "number",
                Self::Code => "code",
            }
        }
    }

    fn classifier() -> Classifier<Test> {
        Classifier::new(ReportKind::Catalog)
            .rule(Test::Word, 0, r"^[a-z]+$")
            .rule(Test::Number, 0, r"^\d+$")
            .rule(Test::Code, 1, r"^\d{6}$")
            .rule(Test::Word, 0, r"^[a-z]{3}$")
    }

    #[test]
    fn unmatched_line_is_continuation() {
        let line = Line::new(0, "  something else");
        assert_eq!(classifier().classify(&line).unwrap(), None);
    }

    #[test]
    fn higher_priority_wins() {
        let line = Line::new(0, "113476");
        assert_eq!(classifier().classify(&line).unwrap(), Some(Test::Code));

        let line = Line::new(1, "12");
        assert_eq!(classifier().classify(&line).unwrap(), Some(Test::Number));
    }

    #[test]
    fn several_rules_for_one_role_are_not_ambiguous() {
        let line = Line::new(0, "abc");
        assert_eq!(classifier().classify(&line).unwrap(), Some(Test::Word));
    }

    #[test]
    fn tie_between_roles_is_ambiguous() {
        let classifier = Classifier::new(ReportKind::Catalog)
            .rule(Test::Word, 2, r"^\w+$")
            .rule(Test::Number, 2, r"^\d+$");
        let line = Line::new(7, "42");

        let error = classifier.classify(&line).unwrap_err();
        assert_eq!(
            error,
            Error::AmbiguousLine {
                kind: ReportKind::Catalog,
                line: 7,
                roles: vec!["word", "number"],
            }
        );
    }
}

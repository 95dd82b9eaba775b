use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// An academic term, written `YYYY/T`.
///
/// Term `0` is the summer term, taught between the second term of one year
/// and the first term of the next. Periods order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: u16,
    term: u8,
}

impl Period {
    /// Creates a period.
    #[must_use]
    pub const fn new(year: u16, term: u8) -> Self {
        Self { year, term }
    }

    /// The calendar year.
    #[must_use]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// The term within the year.
    #[must_use]
    pub const fn term(self) -> u8 {
        self.term
    }

    /// Whether this is a summer term.
    #[must_use]
    pub const fn is_summer(self) -> bool {
        self.term == 0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.year, self.term)
    }
}

/// Errors that can occur when parsing a [`Period`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParsePeriodError {
    /// The text has no `/` separator.
    #[error("missing '/' in period '{0}'")]
    MissingSeparator(String),

    /// The year is not a four digit number.
    #[error("invalid year in period '{0}'")]
    Year(String),

    /// The term is not a single digit.
    #[error("invalid term in period '{0}'")]
    Term(String),
}

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, term) = s
            .split_once('/')
            .ok_or_else(|| ParsePeriodError::MissingSeparator(s.to_string()))?;

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsePeriodError::Year(s.to_string()));
        }
        if term.len() != 1 || !term.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsePeriodError::Term(s.to_string()));
        }

        let year = year
            .parse()
            .map_err(|_| ParsePeriodError::Year(s.to_string()))?;
        let term = term
            .parse()
            .map_err(|_| ParsePeriodError::Term(s.to_string()))?;

        Ok(Self { year, term })
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn parses_and_displays() {
        let period: Period = "2015/2".parse().unwrap();
        assert_eq!(period, Period::new(2015, 2));
        assert_eq!(period.to_string(), "2015/2");
    }

    #[test]
    fn summer_sits_between_years() {
        let second = Period::new(2015, 2);
        let summer = Period::new(2016, 0);
        let first = Period::new(2016, 1);
        assert!(second < summer);
        assert!(summer < first);
        assert!(summer.is_summer());
        assert!(!first.is_summer());
    }

    #[test_case("2015", ParsePeriodError::MissingSeparator("2015".to_string()); "no separator")]
    #[test_case("15/2", ParsePeriodError::Year("15/2".to_string()); "short year")]
    #[test_case("2015/12", ParsePeriodError::Term("2015/12".to_string()); "two digit term")]
    #[test_case("2015/x", ParsePeriodError::Term("2015/x".to_string()); "letter term")]
    fn invalid_periods(input: &str, expected: ParsePeriodError) {
        assert_eq!(input.parse::<Period>().unwrap_err(), expected);
    }

    #[test]
    fn serializes_as_text() {
        assert_eq!(
            serde_json::to_string(&Period::new(2014, 1)).unwrap(),
            r#""2014/1""#
        );
    }
}

//! Enrollment figures derived from parsed reports.
//!
//! The grade history of a course lists everyone who took it; restricted to
//! the students of some degree tracks, it gives the enrollment of the course
//! per period, and from that the average enrollment over a range of periods.

use std::{cmp::Ordering, collections::{BTreeMap, BTreeSet}, fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::{
    domain::Period,
    report::{history::GradeHistory, roster::Roster},
};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(\d{4}/\d)|(\{periodo\}|\{period\})|(<=|>=|==|!=|<|>))")
        .expect("valid filter token pattern")
});

/// A comparison operator of a period filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
}

impl Operator {
    /// The operator that gives the same result with its operands swapped.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Less => Self::Greater,
            Self::LessOrEqual => Self::GreaterOrEqual,
            Self::Greater => Self::Less,
            Self::GreaterOrEqual => Self::LessOrEqual,
            Self::Equal | Self::NotEqual => self,
        }
    }

    /// Whether the operator holds for two operands that compare as given.
    #[must_use]
    pub const fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Less => ordering.is_lt(),
            Self::LessOrEqual => ordering.is_le(),
            Self::Greater => ordering.is_gt(),
            Self::GreaterOrEqual => ordering.is_ge(),
            Self::Equal => ordering.is_eq(),
            Self::NotEqual => ordering.is_ne(),
        }
    }

    const fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned for a period filter that cannot be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid period filter '{filter}': {reason}")]
pub struct InvalidFilterError {
    filter: String,
    reason: &'static str,
}

impl InvalidFilterError {
    fn new(filter: &str, reason: &'static str) -> Self {
        Self {
            filter: filter.to_string(),
            reason,
        }
    }
}

/// A chain of comparisons that selects a range of periods.
///
/// Filters are written the way a coordinator would write the range, with
/// `{periodo}` (or `{period}`) standing for the period being tested:
///
/// ```
/// use sigra::{analysis::PeriodFilter, domain::Period};
///
/// let filter: PeriodFilter = "2014/2 <= {periodo} < 2016/2".parse().unwrap();
/// assert!(filter.matches(Period::new(2015, 1)));
/// assert!(!filter.matches(Period::new(2016, 2)));
/// ```
///
/// Every comparison must involve the placeholder, which must appear exactly
/// once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodFilter {
    comparisons: Vec<(Operator, Period)>,
}

#[derive(Debug, Clone, Copy)]
enum Operand {
    Placeholder,
    Bound(Period),
}

impl PeriodFilter {
    /// Whether a period satisfies every comparison.
    #[must_use]
    pub fn matches(&self, period: Period) -> bool {
        self.comparisons
            .iter()
            .all(|(operator, bound)| operator.holds(period.cmp(bound)))
    }

    /// The comparisons, each reading `period <operator> bound`.
    #[must_use]
    pub fn comparisons(&self) -> &[(Operator, Period)] {
        &self.comparisons
    }
}

impl FromStr for PeriodFilter {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (operands, operators) = tokenize(s)?;

        if operands.len() < 2 {
            return Err(InvalidFilterError::new(s, "expected at least one comparison"));
        }
        let placeholders = operands
            .iter()
            .filter(|operand| matches!(operand, Operand::Placeholder))
            .count();
        if placeholders != 1 {
            return Err(InvalidFilterError::new(
                s,
                "the period placeholder must appear exactly once",
            ));
        }

        let comparisons = operands
            .windows(2)
            .zip(operators)
            .map(|(pair, operator)| match (pair[0], pair[1]) {
                (Operand::Placeholder, Operand::Bound(bound)) => Ok((operator, bound)),
                (Operand::Bound(bound), Operand::Placeholder) => Ok((operator.flip(), bound)),
                _ => Err(InvalidFilterError::new(
                    s,
                    "every comparison must involve the period placeholder",
                )),
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { comparisons })
    }
}

fn tokenize(filter: &str) -> Result<(Vec<Operand>, Vec<Operator>), InvalidFilterError> {
    let mut operands = Vec::new();
    let mut operators = Vec::new();
    let mut rest = filter;

    while !rest.trim().is_empty() {
        let caps = TOKEN
            .captures(rest)
            .ok_or_else(|| InvalidFilterError::new(filter, "unexpected text"))?;
        let expecting_operand = operands.len() == operators.len();

        if let Some(period) = caps.get(1) {
            if !expecting_operand {
                return Err(InvalidFilterError::new(filter, "expected an operator"));
            }
            let period = period
                .as_str()
                .parse()
                .map_err(|_| InvalidFilterError::new(filter, "invalid period"))?;
            operands.push(Operand::Bound(period));
        } else if caps.get(2).is_some() {
            if !expecting_operand {
                return Err(InvalidFilterError::new(filter, "expected an operator"));
            }
            operands.push(Operand::Placeholder);
        } else {
            if expecting_operand {
                return Err(InvalidFilterError::new(filter, "expected a period"));
            }
            let operator = match &caps[3] {
                "<" => Operator::Less,
                "<=" => Operator::LessOrEqual,
                ">" => Operator::Greater,
                ">=" => Operator::GreaterOrEqual,
                "==" => Operator::Equal,
                _ => Operator::NotEqual,
            };
            operators.push(operator);
        }

        rest = &rest[caps.get(0).map_or(rest.len(), |m| m.end())..];
    }

    if operands.len() == operators.len() && !operators.is_empty() {
        return Err(InvalidFilterError::new(filter, "expected a period after the last operator"));
    }
    Ok((operands, operators))
}

/// The number of students who took a course in each period.
///
/// A student in several classes of one period is counted once.
///
/// With a roster, only students of the given degree tracks are counted (an
/// empty list of tracks stands for every track in the roster). Without one,
/// everyone in the history is counted. Every period of the history is
/// listed, even when no one is counted in it.
#[must_use]
pub fn enrollment_by_period(
    history: &GradeHistory,
    roster: Option<&Roster>,
    tracks: &[String],
) -> BTreeMap<Period, u32> {
    history
        .periods()
        .into_iter()
        .map(|period| {
            let students: BTreeSet<&str> = history
                .registrations_in(period)
                .filter(|registration| {
                    roster.is_none_or(|roster| roster.enrols(registration, tracks))
                })
                .collect();
            (period, u32::try_from(students.len()).unwrap_or(u32::MAX))
        })
        .collect()
}

/// The average enrollment per period.
///
/// Periods with no one enrolled are left out, and so are summer terms when
/// `ignore_summer` is set and periods the filter rejects. Returns zero when
/// no period is left.
#[must_use]
pub fn mean_enrollment(
    counts: &BTreeMap<Period, u32>,
    ignore_summer: bool,
    filter: Option<&PeriodFilter>,
) -> f64 {
    let mut total = 0_u32;
    let mut periods = 0_u32;

    for (&period, &count) in counts {
        if count == 0
            || (ignore_summer && period.is_summer())
            || filter.is_some_and(|filter| !filter.matches(period))
        {
            continue;
        }
        total += count;
        periods += 1;
    }

    if periods == 0 {
        0.0
    } else {
        f64::from(total) / f64::from(periods)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::report::{ParseOptions, history, roster};

    fn filter(text: &str) -> PeriodFilter {
        text.parse().unwrap()
    }

    #[test_case("2014/2 <= {periodo} < 2016/2", "2014/2", true)]
    #[test_case("2014/2 <= {periodo} < 2016/2", "2016/1", true)]
    #[test_case("2014/2 <= {periodo} < 2016/2", "2016/2", false)]
    #[test_case("2014/2 <= {periodo} < 2016/2", "2014/1", false)]
    #[test_case("{period} > 2015/1", "2015/2", true)]
    #[test_case("{period} > 2015/1", "2015/1", false)]
    #[test_case("2015/1 > {periodo}", "2014/2", true; "bound on the left")]
    #[test_case("{periodo} != 2015/0", "2015/0", false)]
    #[test_case("{periodo}==2015/1", "2015/1", true; "no spaces")]
    fn filters_select_periods(text: &str, period: &str, expected: bool) {
        assert_eq!(filter(text).matches(period.parse().unwrap()), expected);
    }

    #[test]
    fn bound_on_the_left_is_flipped() {
        assert_eq!(
            filter("2014/2 <= {periodo} < 2016/2").comparisons(),
            &[
                (Operator::GreaterOrEqual, Period::new(2014, 2)),
                (Operator::Less, Period::new(2016, 2)),
            ]
        );
    }

    #[test_case(""; "empty")]
    #[test_case("{periodo}"; "no comparison")]
    #[test_case("2014/2 < 2016/2"; "no placeholder")]
    #[test_case("{periodo} < {periodo}"; "two placeholders")]
    #[test_case("2014/1 < 2014/2 < {periodo}"; "comparison between bounds")]
    #[test_case("{periodo} <"; "dangling operator")]
    #[test_case("{periodo} < 2014/2 2015/1"; "missing operator")]
    #[test_case("{periodo} => 2014/2"; "unknown operator")]
    #[test_case("{periodo} < 2014/2 or {periodo} > 2016/1"; "unexpected words")]
    #[test_case("__import__('os') < {periodo}"; "arbitrary code")]
    fn malformed_filters_are_rejected(text: &str) {
        assert!(text.parse::<PeriodFilter>().is_err());
    }

    const HISTORY: &str = "\
  14/0012345  2014/1  A   MM  ANA MARIA SOUZA
  14/0054321  2014/1  A   SR  BRUNO COSTA
  14/0099999  2014/1  B   SS  DANIEL ALVES
  14/0054321  2014/2  A   MS  BRUNO COSTA
  14/0099999  2015/0  A   MS  DANIEL ALVES
  15/0011111  2015/1  C   TR  CARLA DIAS
";

    const ROSTER: &str = "\
  14/0012345  ANA MARIA SOUZA  2014/1  Vestibular  1856  Ciência da Computação
  14/0054321  BRUNO COSTA  2014/1  PAS  1856  Ciência da Computação
  14/0099999  DANIEL ALVES  2014/1  PAS  1899  Engenharia de Computação
";

    fn counts(tracks: &[String], with_roster: bool) -> BTreeMap<Period, u32> {
        let history = history::parse(HISTORY, &ParseOptions::default()).unwrap().records;
        let roster = roster::parse(ROSTER, &ParseOptions::default()).unwrap().records;
        enrollment_by_period(&history, with_roster.then_some(&roster), tracks)
    }

    #[test]
    fn without_roster_everyone_counts() {
        let counts = counts(&[], false);
        assert_eq!(counts[&Period::new(2014, 1)], 3);
        assert_eq!(counts[&Period::new(2015, 1)], 1);
    }

    #[test]
    fn student_in_two_classes_of_a_period_counts_once() {
        let text = "\
  14/0012345  2014/1  A   MM  ANA MARIA SOUZA
  14/0012345  2014/1  B   MM  ANA MARIA SOUZA
  14/0054321  2014/1  B   SR  BRUNO COSTA
";
        let history = history::parse(text, &ParseOptions::default()).unwrap().records;
        let counts = enrollment_by_period(&history, None, &[]);
        assert_eq!(counts, BTreeMap::from([(Period::new(2014, 1), 2)]));
    }

    #[test]
    fn roster_restricts_to_its_tracks() {
        let counts = counts(&["1856".to_string()], true);
        assert_eq!(counts[&Period::new(2014, 1)], 2);
        assert_eq!(counts[&Period::new(2014, 2)], 1);
        assert_eq!(counts[&Period::new(2015, 0)], 0);
        assert_eq!(counts[&Period::new(2015, 1)], 0);
    }

    #[test]
    fn empty_period_and_summer_are_left_out_of_the_mean() {
        let counts = counts(&[], true);
        // 2014/1: 3, 2014/2: 1, 2015/0: 1 (summer), 2015/1: 0 (not in roster)
        assert!((mean_enrollment(&counts, true, None) - 2.0).abs() < f64::EPSILON);
        assert!((mean_enrollment(&counts, false, None) - 5.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn filter_narrows_the_mean() {
        let counts = counts(&[], false);
        let filter = filter("2014/2 <= {periodo} < 2016/2");
        assert!((mean_enrollment(&counts, true, Some(&filter)) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert!(mean_enrollment(&BTreeMap::new(), true, None).abs() < f64::EPSILON);
    }
}

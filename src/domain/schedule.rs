//! Weekly class meetings of an offered section.

use std::{fmt, str::FromStr};

use chrono::NaiveTime;
use serde::{Serialize, Serializer};

/// A day of the week, as printed in offering listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    /// Segunda
    Monday,
    /// Terça
    Tuesday,
    /// Quarta
    Wednesday,
    /// Quinta
    Thursday,
    /// Sexta
    Friday,
    /// Sábado
    Saturday,
    /// Domingo
    Sunday,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// The Portuguese name used in the reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Segunda",
            Self::Tuesday => "Terça",
            Self::Wednesday => "Quarta",
            Self::Thursday => "Quinta",
            Self::Friday => "Sexta",
            Self::Saturday => "Sábado",
            Self::Sunday => "Domingo",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for a day name that is not one of the seven weekdays.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown weekday '{0}'")]
pub struct ParseWeekdayError(String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name() == s)
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// The start and end time of a meeting, printed as `HH:MM HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    /// When the meeting starts.
    pub start: NaiveTime,
    /// When the meeting ends.
    pub end: NaiveTime,
}

/// Error returned for text that is not an `HH:MM HH:MM` time slot.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid time slot '{0}'")]
pub struct ParseTimeSlotError(String);

impl FromStr for TimeSlot {
    type Err = ParseTimeSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseTimeSlotError(s.to_string());
        let (start, end) = s.trim().split_once(' ').ok_or_else(error)?;
        let time = |text: &str| NaiveTime::parse_from_str(text.trim(), "%H:%M").map_err(|_| error());

        Ok(Self {
            start: time(start)?,
            end: time(end)?,
        })
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One weekly meeting of a section.
///
/// Meetings order by day, then by time, then by location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClassMeeting {
    /// Day of the week.
    pub day: Weekday,
    /// Start and end time.
    pub slot: TimeSlot,
    /// Room or building, as printed.
    pub location: String,
}

impl fmt::Display for ClassMeeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.day, self.slot, self.location)
    }
}

/// The weekly meetings of a section, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassSchedule {
    meetings: Vec<ClassMeeting>,
}

impl ClassSchedule {
    /// Adds a meeting at its sorted position.
    pub fn add(&mut self, meeting: ClassMeeting) {
        let index = self.meetings.partition_point(|m| m <= &meeting);
        self.meetings.insert(index, meeting);
    }

    /// The meetings in day and time order.
    #[must_use]
    pub fn meetings(&self) -> &[ClassMeeting] {
        &self.meetings
    }

    /// Whether there are no meetings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }

    /// Number of weekly meetings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meetings.len()
    }
}

impl FromIterator<ClassMeeting> for ClassSchedule {
    fn from_iter<T: IntoIterator<Item = ClassMeeting>>(iter: T) -> Self {
        let mut schedule = Self::default();
        for meeting in iter {
            schedule.add(meeting);
        }
        schedule
    }
}

/// The period of the day a section is offered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    /// Diurno
    Day,
    /// Noturno
    Night,
    /// Ambos
    Both,
}

impl Shift {
    /// The Portuguese name used in the reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Day => "Diurno",
            Self::Night => "Noturno",
            Self::Both => "Ambos",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for a shift name other than Diurno, Noturno or Ambos.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown shift '{0}'")]
pub struct ParseShiftError(String);

impl FromStr for Shift {
    type Err = ParseShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Diurno" => Ok(Self::Day),
            "Noturno" => Ok(Self::Night),
            "Ambos" => Ok(Self::Both),
            other => Err(ParseShiftError(other.to_string())),
        }
    }
}

impl Serialize for Shift {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

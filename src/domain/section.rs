use std::collections::BTreeMap;

use serde::Serialize;

use super::schedule::{ClassMeeting, ClassSchedule, Shift};

/// A class section (turma) of an offered course.
///
/// A section is printed as one marker line followed by any number of
/// continuation lines, which extend the description, add meetings, and
/// carry instructor names, reservations and observation flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// One to three uppercase letters, unique within the course.
    pub code: String,
    /// Free text describing the section, wrapped fragments joined by a space.
    pub description: String,
    /// Number of seats offered.
    pub seats: u32,
    /// The shift the section is offered in.
    pub shift: Shift,
    /// Weekly meetings, sorted by day then time.
    pub schedule: ClassSchedule,
    /// Instructor names in the order they appear.
    pub instructors: Vec<String>,
    /// Seats reserved per student group.
    pub reservations: BTreeMap<String, u32>,
    /// Observation flags such as `**`.
    pub observations: Vec<String>,
}

impl Section {
    /// Creates a section with no meetings, instructors or annotations.
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>, seats: u32, shift: Shift) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            seats,
            shift,
            schedule: ClassSchedule::default(),
            instructors: Vec::new(),
            reservations: BTreeMap::new(),
            observations: Vec::new(),
        }
    }

    /// Appends a wrapped description fragment.
    pub fn append_description(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        if self.description.is_empty() {
            self.description = fragment.to_string();
        } else {
            self.description.push(' ');
            self.description.push_str(fragment);
        }
    }

    /// Adds a meeting to the schedule.
    pub fn add_meeting(&mut self, meeting: ClassMeeting) {
        self.schedule.add(meeting);
    }

    /// Folds an instructor name fragment into the instructor list.
    ///
    /// Long names wrap onto the next line of the report, so a fragment of a
    /// single word continues the name in progress, while a fragment of two
    /// or more words starts a new name. An instructor whose whole name is a
    /// single word is therefore merged into the previous name.
    pub fn add_instructor_fragment(&mut self, fragment: &str) {
        let words: Vec<&str> = fragment.split_whitespace().collect();
        match (words.as_slice(), self.instructors.last_mut()) {
            ([], _) => {}
            ([word], Some(name)) => {
                name.push(' ');
                name.push_str(word);
            }
            (words, _) => self.instructors.push(words.join(" ")),
        }
    }

    /// Records the seats reserved for a student group, replacing any earlier
    /// figure for the same group.
    pub fn reserve(&mut self, group: impl Into<String>, seats: u32) {
        self.reservations.insert(group.into(), seats);
    }

    /// Appends an observation flag.
    pub fn observe(&mut self, flag: impl Into<String>) {
        self.observations.push(flag.into());
    }
}

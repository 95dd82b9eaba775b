use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The four-category hour allocation that defines a course's credit load.
///
/// Reports print the components as zero-padded three digit numbers
/// (`004  -   002   -   000  -   006`); the canonical text form is the
/// colon-joined `theory:practice:extension:study`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreditBreakdown {
    /// Theory hours.
    pub theory: u32,
    /// Practice (laboratory) hours.
    pub practice: u32,
    /// Extension hours.
    pub extension: u32,
    /// Individual study hours.
    pub study: u32,
}

impl CreditBreakdown {
    /// Creates a breakdown from its four components.
    #[must_use]
    pub const fn new(theory: u32, practice: u32, extension: u32, study: u32) -> Self {
        Self {
            theory,
            practice,
            extension,
            study,
        }
    }

    /// Total credits of the course.
    ///
    /// Individual study hours are not part of the load a student enrols
    /// for, so they are left out. Use [`Self::total_with_study`] to count
    /// them.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.theory
            .saturating_add(self.practice)
            .saturating_add(self.extension)
    }

    /// Sum of all four components.
    #[must_use]
    pub const fn total_with_study(&self) -> u32 {
        self.total().saturating_add(self.study)
    }
}

impl fmt::Display for CreditBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.theory, self.practice, self.extension, self.study
        )
    }
}

/// Error returned when a string is not a colon-joined credit breakdown.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseCreditsError {
    /// The string does not have exactly four components.
    #[error("expected 4 colon-separated credit components, found {0}")]
    Components(usize),

    /// A component is not a non-negative integer.
    #[error("invalid credit component '{0}'")]
    Component(String),
}

impl FromStr for CreditBreakdown {
    type Err = ParseCreditsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [theory, practice, extension, study] = parts[..] else {
            return Err(ParseCreditsError::Components(parts.len()));
        };

        let component = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| ParseCreditsError::Component(part.to_string()))
        };

        Ok(Self::new(
            component(theory)?,
            component(practice)?,
            component(extension)?,
            component(study)?,
        ))
    }
}

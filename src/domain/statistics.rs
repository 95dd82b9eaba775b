use std::ops::Add;

use serde::Serialize;

/// A headcount split by sex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SexCount {
    /// Male students.
    pub male: u32,
    /// Female students.
    pub female: u32,
}

impl SexCount {
    /// Creates a count.
    #[must_use]
    pub const fn new(male: u32, female: u32) -> Self {
        Self { male, female }
    }

    /// Both sexes together.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.male + self.female
    }
}

impl Add for SexCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.male + rhs.male, self.female + rhs.female)
    }
}

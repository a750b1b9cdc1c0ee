mod course;
mod registers;
mod room;
mod schedule;
mod section;
mod time;

pub use course::*;
pub use registers::*;
pub use room::*;
pub use schedule::*;
pub use section::*;
pub use time::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for a department code (e.g. `CS`, `EC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Department(pub String);

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for a semester label (e.g. `"4"`, `"4A"`). Kept as a string since
/// the catalog freely mixes bare numbers and lettered variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Semester(pub String);

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Semester {
    /// The leading digit of the label, used to key the staggered meal calendar.
    pub fn base(&self) -> Option<u32> {
        self.0.chars().next().and_then(|c| c.to_digit(10))
    }
}

/// Newtype for a course code (e.g. `CS301`, `B1-ML`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CourseCode(pub String);

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl CourseCode {
    /// An elective's code starts with `B` and contains a `-`.
    pub fn is_elective(&self) -> bool {
        self.0.starts_with('B') && self.0.contains('-')
    }

    /// The basket prefix before the `-` (e.g. `B1-ML` -> `B1`).
    pub fn elective_group(&self) -> Option<&str> {
        if self.is_elective() {
            self.0.split('-').next()
        } else {
            None
        }
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        let upper = self.0.to_uppercase();
        needles.iter().any(|n| upper.contains(n))
    }
}

/// Newtype for an instructor's display name, after `/`-alternative selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstructorName(pub String);

impl fmt::Display for InstructorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl InstructorName {
    /// Select the first alternative from a `/`-separated faculty string.
    pub fn select(raw: &str) -> Self {
        let first = raw.split('/').next().unwrap_or(raw).trim();
        Self(first.to_string())
    }
}

/// Newtype for a room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl RoomId {
    pub const DEFAULT: &'static str = "DEFAULT_ROOM";

    pub fn default_room() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

use super::{CourseCode, Department, InstructorName, Semester};
use serde::{Deserialize, Serialize};

/// Credit tuple (lecture, tutorial, lab/practical, self-study) as read from
/// the catalog's `L`, `T`, `P`, `S` columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditHours {
    pub lecture: f64,
    pub tutorial: u32,
    pub lab: u32,
    pub self_study: u32,
}

/// A course offering, keyed by (Department, Semester, CourseCode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub department: Department,
    pub semester: Semester,
    pub code: CourseCode,
    pub name: String,
    /// The selected instructor, after `/`-alternative resolution.
    pub faculty: InstructorName,
    pub credits: CreditHours,
    /// Whether this course is active for scheduling (`Schedule` column).
    pub schedule: bool,
}

impl Course {
    /// An elective iff the code starts with `B` and contains `-`.
    pub fn is_elective(&self) -> bool {
        self.code.is_elective()
    }

    pub fn elective_group(&self) -> Option<&str> {
        self.code.elective_group()
    }
}

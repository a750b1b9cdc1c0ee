use super::{CourseCode, Department, InstructorName, Section, Semester};
use serde::Serialize;

/// A course with a positive deficit between required and placed sessions
/// (§4.6 Unscheduled reporter).
#[derive(Debug, Clone, Serialize)]
pub struct UnscheduledEntry {
    pub department: Department,
    pub semester: Semester,
    pub code: CourseCode,
    pub name: String,
    pub faculty: InstructorName,
    pub expected_slots: usize,
    pub scheduled_slots: usize,
}

impl UnscheduledEntry {
    pub fn missing_slots(&self) -> usize {
        self.expected_slots.saturating_sub(self.scheduled_slots)
    }
}

/// Metadata about a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleMetadata {
    pub generated_at: String,
    pub algorithm_version: String,
    pub solve_time_ms: u64,
}

/// The complete output of a generation run: every section's timetable, plus
/// the global unscheduled-courses report.
#[derive(Debug)]
pub struct GeneratedSchedule {
    pub sections: Vec<Section>,
    pub unscheduled: Vec<UnscheduledEntry>,
    pub metadata: ScheduleMetadata,
}

impl GeneratedSchedule {
    pub fn sections_for(&self, department: &Department, semester: &Semester) -> Vec<&Section> {
        self.sections
            .iter()
            .filter(|s| &s.department == department && &s.semester == semester)
            .collect()
    }
}

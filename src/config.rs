use crate::types::TimeGrid;
use chrono::NaiveTime;

/// Tunable constants for the scheduler, with the spec's defaults.
///
/// Exposed as a struct (rather than free constants) so tests can shrink the
/// grid or retry budget, the way the teacher overrides `ScheduleConfig` in
/// its own tests instead of relying on module-level statics.
#[derive(Debug, Clone)]
pub struct ScheduleConstants {
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub slot_minutes: u32,
    pub days_per_week: u8,

    pub morning_break_start: NaiveTime,
    pub morning_break_end: NaiveTime,
    pub meal_period_start: NaiveTime,
    pub meal_period_end: NaiveTime,
    pub meal_duration_minutes: u32,

    pub buffer_slots: usize,
    pub retry_budget: u32,

    /// Capacity assumed for a (dept, semester) with no batch record.
    pub default_section_size: u32,
    /// Enrollment above which a lab session is split into paired rooms.
    pub lab_oversize_threshold: u32,
    /// Hours of same-course spacing enforced between LEC/TUT sessions.
    pub same_course_spacing_hours: u32,
}

impl Default for ScheduleConstants {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            day_end: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            slot_minutes: 30,
            days_per_week: 5,

            morning_break_start: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            morning_break_end: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            meal_period_start: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            meal_period_end: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            meal_duration_minutes: 60,

            buffer_slots: 1,
            retry_budget: 1000,

            default_section_size: 60,
            lab_oversize_threshold: 35,
            same_course_spacing_hours: 3,
        }
    }
}

impl ScheduleConstants {
    pub fn time_grid(&self) -> TimeGrid {
        TimeGrid::new(self.day_start, self.day_end, self.slot_minutes)
    }

    pub fn same_course_spacing_slots(&self) -> usize {
        (self.same_course_spacing_hours * 60 / self.slot_minutes) as usize
    }
}

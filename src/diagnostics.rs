//! Invariant checks for a generated schedule (§8). Not exposed on the CLI —
//! consulted by tests and available to callers who want to audit a run.

use crate::config::ScheduleConstants;
use crate::scheduler::breaks::BreakCalendar;
use crate::types::{GeneratedSchedule, InstructorName, RoomId, SessionKind};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct Violation {
    pub invariant: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct DiagnosticsReport {
    pub violations: Vec<Violation>,
}

impl DiagnosticsReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, invariant: &'static str, message: impl Into<String>) {
        self.violations.push(Violation {
            invariant,
            message: message.into(),
        });
    }
}

/// Check every §8 invariant against a completed run.
pub fn check_schedule(schedule: &GeneratedSchedule, constants: &ScheduleConstants, bases: &std::collections::BTreeSet<u32>) -> DiagnosticsReport {
    let mut report = DiagnosticsReport::default();
    let grid = constants.time_grid();
    let breaks = BreakCalendar::build(bases, constants);

    check_no_break_overlap(schedule, &grid, &breaks, &mut report);
    check_instructor_conflict_free(schedule, &mut report);
    check_room_conflict_free(schedule, &mut report);
    check_same_course_spacing(schedule, constants, &mut report);
    check_adjacent_lecture_buffer(schedule, constants, &mut report);
    check_instructor_daily_load(schedule, &mut report);

    report
}

fn check_no_break_overlap(schedule: &GeneratedSchedule, grid: &crate::types::TimeGrid, breaks: &BreakCalendar, report: &mut DiagnosticsReport) {
    for section in &schedule.sections {
        let base = section.semester.base();
        for (day, slot, cell) in section.timetable.iter_starts() {
            for offset in 0..cell.kind.slot_length() {
                if breaks.is_break(grid, slot + offset, base) {
                    report.push(
                        "no-break-overlap",
                        format!("{} {}: {} at day {} slot {} overlaps a break slot", section.title(), cell.code, cell.kind.label(), day, slot + offset),
                    );
                }
            }
        }
    }
}

fn check_instructor_conflict_free(schedule: &GeneratedSchedule, report: &mut DiagnosticsReport) {
    let mut seen: HashMap<(InstructorName, usize, usize), String> = HashMap::new();
    for section in &schedule.sections {
        for (day, slot, cell) in section.timetable.iter_starts() {
            for offset in 0..cell.kind.slot_length() {
                let key = (cell.faculty.clone(), day, slot + offset);
                if let Some(prior) = seen.insert(key, section.title()) {
                    report.push(
                        "instructor-conflict-free",
                        format!("Instructor {} double-booked on day {} slot {} ({} vs {})", cell.faculty, day, slot + offset, prior, section.title()),
                    );
                }
            }
        }
    }
}

fn check_room_conflict_free(schedule: &GeneratedSchedule, report: &mut DiagnosticsReport) {
    let mut seen: HashMap<(RoomId, usize, usize), String> = HashMap::new();
    for section in &schedule.sections {
        for (day, slot, cell) in section.timetable.iter_starts() {
            if cell.room.0 == RoomId::DEFAULT {
                continue;
            }
            for room_id in cell.room.0.split(',') {
                for offset in 0..cell.kind.slot_length() {
                    let key = (RoomId(room_id.to_string()), day, slot + offset);
                    if let Some(prior) = seen.insert(key, section.title()) {
                        report.push(
                            "room-conflict-free",
                            format!("Room {} double-booked on day {} slot {} ({} vs {})", room_id, day, slot + offset, prior, section.title()),
                        );
                    }
                }
            }
        }
    }
}

fn check_same_course_spacing(schedule: &GeneratedSchedule, constants: &ScheduleConstants, report: &mut DiagnosticsReport) {
    let window = constants.same_course_spacing_slots();
    for section in &schedule.sections {
        let mut by_instructor_day: HashMap<(InstructorName, usize), Vec<(usize, crate::types::CourseCode)>> = HashMap::new();
        for (day, slot, cell) in section.timetable.iter_starts() {
            if matches!(cell.kind, SessionKind::Lec | SessionKind::Tut) {
                by_instructor_day.entry((cell.faculty.clone(), day)).or_default().push((slot, cell.code.clone()));
            }
        }
        for ((instructor, day), placements) in by_instructor_day {
            for i in 0..placements.len() {
                for j in (i + 1)..placements.len() {
                    let (s1, c1) = &placements[i];
                    let (s2, c2) = &placements[j];
                    if c1 == c2 && s1.abs_diff(*s2) <= window {
                        report.push(
                            "same-course-spacing",
                            format!("{} teaches {} twice on day {} within the spacing window ({} and {})", instructor, c1, day, s1, s2),
                        );
                    }
                }
            }
        }
    }
}

fn check_adjacent_lecture_buffer(schedule: &GeneratedSchedule, constants: &ScheduleConstants, report: &mut DiagnosticsReport) {
    let buffer = constants.buffer_slots;
    for section in &schedule.sections {
        for (day, slot, cell) in section.timetable.iter_starts() {
            if cell.kind != SessionKind::Lec {
                continue;
            }
            let duration = cell.kind.slot_length();
            let before = slot.saturating_sub(buffer)..slot;
            let after_start = slot + duration;
            let after = after_start..(after_start + buffer).min(section.timetable.slots());
            for probe in before.chain(after) {
                if let Some(kind) = section.timetable.kind_at(day, probe) {
                    if matches!(kind, SessionKind::Lec | SessionKind::Lab | SessionKind::Tut) {
                        report.push(
                            "adjacent-lecture-buffer",
                            format!("{} {} on day {} slot {} has no buffer at slot {}", section.title(), cell.code, day, slot, probe),
                        );
                    }
                }
            }
        }
    }
}

fn check_instructor_daily_load(schedule: &GeneratedSchedule, report: &mut DiagnosticsReport) {
    for section in &schedule.sections {
        let mut by_instructor_day: HashMap<(InstructorName, usize), (usize, HashSet<String>)> = HashMap::new();
        for (day, _, cell) in section.timetable.iter_starts() {
            if !cell.kind.counts_toward_daily_load() {
                continue;
            }
            let entry = by_instructor_day.entry((cell.faculty.clone(), day)).or_insert((0, HashSet::new()));
            if cell.code.is_elective() {
                entry.1.insert(cell.code.elective_group().unwrap_or_default().to_string());
            } else {
                entry.0 += 1;
            }
        }
        for ((instructor, day), (non_elective, groups)) in by_instructor_day {
            let cap = if groups.is_empty() { 2 } else { 3 };
            if non_elective + groups.len() > cap {
                report.push(
                    "instructor-daily-load",
                    format!("Instructor {} exceeds daily load on day {} ({} non-elective + {} elective group(s))", instructor, day, non_elective, groups.len()),
                );
            }
        }
    }
}

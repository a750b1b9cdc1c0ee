use crate::config::ScheduleConstants;
use crate::scheduler::breaks::BreakCalendar;
use crate::types::{CourseCode, InstructorName, InstructorRegister, SessionKind, Timetable};
use std::collections::HashSet;

/// Stateless predicates consulted by the placement engine (§4.2). Each
/// function reads a register or timetable without mutating it.
pub struct ConstraintOracle<'a> {
    pub breaks: &'a BreakCalendar,
    pub constants: &'a ScheduleConstants,
}

impl<'a> ConstraintOracle<'a> {
    pub fn new(breaks: &'a BreakCalendar, constants: &'a ScheduleConstants) -> Self {
        Self { breaks, constants }
    }

    pub fn is_break(
        &self,
        grid: &crate::types::TimeGrid,
        slot: usize,
        semester_base: Option<u32>,
    ) -> bool {
        self.breaks.is_break(grid, slot, semester_base)
    }

    /// Whether `instructor` may additionally take on `code` on `day`, given
    /// the sessions already recorded there. Electives of the same code
    /// collapse into a single count regardless of which course is the
    /// candidate; a candidate elective gets a `<3` cap once its own group
    /// already has a session that day, otherwise the cap is `<2`.
    pub fn instructor_daily_load(&self, instructors: &InstructorRegister, instructor: &InstructorName, day: usize, code: &CourseCode) -> bool {
        let sessions = instructors.sessions_on_day(instructor, day);
        let group = code.elective_group();

        let mut count = 0usize;
        let mut seen_elective_codes: HashSet<&CourseCode> = HashSet::new();
        let mut group_already_present = false;
        for s in sessions {
            if !s.kind.counts_toward_daily_load() {
                continue;
            }
            if s.code.is_elective() {
                if seen_elective_codes.insert(&s.code) {
                    count += 1;
                }
            } else {
                count += 1;
            }
            if group.is_some() && s.code.elective_group() == group {
                group_already_present = true;
            }
        }

        if code.is_elective() && group_already_present {
            count < 3
        } else {
            count < 2
        }
    }

    /// Reject LEC/TUT placements within ±`same_course_spacing_slots` of an
    /// existing LEC/TUT of the same code taught by the same instructor on
    /// the same day. Labs and self-study are exempt.
    pub fn same_course_spacing(&self, instructors: &InstructorRegister, instructor: &InstructorName, code: &CourseCode, day: usize, start: usize) -> bool {
        let window = self.constants.same_course_spacing_slots();
        for s in instructors.sessions_on_day(instructor, day) {
            if !matches!(s.kind, SessionKind::Lec | SessionKind::Tut) || &s.code != code {
                continue;
            }
            let distance = start.abs_diff(s.start);
            if distance <= window {
                return false;
            }
        }
        true
    }

    /// Reject a LEC placement if a LEC/LAB/TUT occupies the buffer slot
    /// immediately before or after it in the same section timetable.
    pub fn adjacent_lecture_buffer(&self, timetable: &Timetable, day: usize, start: usize, duration: usize) -> bool {
        let buffer = self.constants.buffer_slots;
        let before = start.saturating_sub(buffer)..start;
        let after_start = start + duration;
        let after = after_start..(after_start + buffer).min(timetable.slots());

        for slot in before.chain(after) {
            if let Some(kind) = timetable.kind_at(day, slot) {
                if matches!(kind, SessionKind::Lec | SessionKind::Lab | SessionKind::Tut) {
                    return false;
                }
            }
        }
        true
    }

    /// Always false; reserved for institution-wide hard-blocked slots (§9).
    pub fn reserved(&self, _slot: usize, _day: usize, _semester_base: Option<u32>, _department: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseCode, InstructorSession, RoomId};
    use std::collections::BTreeSet;

    fn oracle(constants: &ScheduleConstants, breaks: &BreakCalendar) -> ConstraintOracle<'_> {
        ConstraintOracle::new(breaks, constants)
    }

    #[test]
    fn adjacent_lecture_buffer_blocks_back_to_back_lectures() {
        let constants = ScheduleConstants::default();
        let bases: BTreeSet<u32> = [4].into_iter().collect();
        let breaks = BreakCalendar::build(&bases, &constants);
        let o = oracle(&constants, &breaks);

        let mut tt = Timetable::new(5, 19);
        tt.place(
            0,
            5,
            SessionKind::Lec,
            &CourseCode("CS301".into()),
            "Algorithms",
            &InstructorName("Dr. X".into()),
            &RoomId("R1".into()),
        );
        assert!(!o.adjacent_lecture_buffer(&tt, 0, 8, 3));
        assert!(o.adjacent_lecture_buffer(&tt, 0, 9, 3));
    }

    #[test]
    fn same_course_spacing_blocks_within_window() {
        let constants = ScheduleConstants::default();
        let bases: BTreeSet<u32> = [4].into_iter().collect();
        let breaks = BreakCalendar::build(&bases, &constants);
        let o = oracle(&constants, &breaks);

        let mut reg = InstructorRegister::new(5);
        let instructor = InstructorName("Dr. X".into());
        let code = CourseCode("CS301".into());
        reg.record_session(
            &instructor,
            0,
            InstructorSession {
                start: 2,
                len: 3,
                kind: SessionKind::Lec,
                code: code.clone(),
            },
        );
        assert!(!o.same_course_spacing(&reg, &instructor, &code, 0, 6));
        assert!(o.same_course_spacing(&reg, &instructor, &code, 0, 12));
    }

    #[test]
    fn instructor_daily_load_caps_nonelective_at_two() {
        let constants = ScheduleConstants::default();
        let bases: BTreeSet<u32> = [4].into_iter().collect();
        let breaks = BreakCalendar::build(&bases, &constants);
        let o = oracle(&constants, &breaks);

        let mut reg = InstructorRegister::new(5);
        let instructor = InstructorName("Dr. X".into());
        reg.record_session(
            &instructor,
            0,
            InstructorSession {
                start: 0,
                len: 3,
                kind: SessionKind::Lec,
                code: CourseCode("CS301".into()),
            },
        );
        reg.record_session(
            &instructor,
            0,
            InstructorSession {
                start: 5,
                len: 3,
                kind: SessionKind::Lec,
                code: CourseCode("CS302".into()),
            },
        );

        let code_c = CourseCode("CS303".into());
        assert!(!o.instructor_daily_load(&reg, &instructor, 0, &code_c));
    }

    #[test]
    fn elective_load_allows_third_session_once_group_present() {
        let constants = ScheduleConstants::default();
        let bases: BTreeSet<u32> = [4].into_iter().collect();
        let breaks = BreakCalendar::build(&bases, &constants);
        let o = oracle(&constants, &breaks);

        let mut reg = InstructorRegister::new(5);
        let instructor = InstructorName("Dr. X".into());
        reg.record_session(
            &instructor,
            0,
            InstructorSession {
                start: 0,
                len: 3,
                kind: SessionKind::Lec,
                code: CourseCode("B1-A".into()),
            },
        );
        reg.record_session(
            &instructor,
            0,
            InstructorSession {
                start: 10,
                len: 3,
                kind: SessionKind::Lec,
                code: CourseCode("CS302".into()),
            },
        );

        let candidate = CourseCode("B1-B".into());
        assert!(o.instructor_daily_load(&reg, &instructor, 0, &candidate));
    }

    #[test]
    fn repeated_elective_code_collapses_to_one_count_for_any_candidate() {
        let constants = ScheduleConstants::default();
        let bases: BTreeSet<u32> = [4].into_iter().collect();
        let breaks = BreakCalendar::build(&bases, &constants);
        let o = oracle(&constants, &breaks);

        let mut reg = InstructorRegister::new(5);
        let instructor = InstructorName("Dr. X".into());
        reg.record_session(
            &instructor,
            0,
            InstructorSession {
                start: 0,
                len: 3,
                kind: SessionKind::Lec,
                code: CourseCode("B2-A".into()),
            },
        );
        reg.record_session(
            &instructor,
            0,
            InstructorSession {
                start: 5,
                len: 3,
                kind: SessionKind::Lec,
                code: CourseCode("B2-A".into()),
            },
        );

        let candidate = CourseCode("CS303".into());
        assert!(o.instructor_daily_load(&reg, &instructor, 0, &candidate));
    }
}

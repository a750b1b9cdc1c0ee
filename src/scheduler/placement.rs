use crate::config::ScheduleConstants;
use crate::scheduler::constraints::ConstraintOracle;
use crate::scheduler::requirements::SessionRequirement;
use crate::scheduler::room_allocator::{allocate_room, ElectiveRoomLedger, RoomRequest};
use crate::types::{Course, InstructorRegister, InstructorSession, RoomId, RoomRegister, Section, SessionKind, TimeGrid};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// A course as seen by the placement engine: its derived session counts,
/// the enrollment figure used to size its rooms (registered total for
/// electives, section size otherwise), and the cohort's total enrollment
/// across every section (registered total for electives, the department's
/// `total_students` otherwise) — the figure the lab-oversizing decision is
/// keyed on, independent of how that cohort happens to be split into
/// sections.
#[derive(Debug, Clone)]
pub struct CourseInput {
    pub course: Course,
    pub requirement: SessionRequirement,
    pub enrollment: u32,
    pub total_students: u32,
}

/// Higher runs first within a pass (§4.4).
fn course_priority(course: &Course) -> i32 {
    if course.credits.lab > 0 && !course.is_elective() {
        let mut p = 10;
        if course.code.contains_any(&["CS", "EC"]) {
            p += 2;
        }
        p
    } else if course.is_elective() {
        1
    } else if course.credits.lecture > 2.0 {
        3
    } else if course.credits.tutorial > 0 {
        2
    } else {
        0
    }
}

fn ordered_by_priority(courses: &[CourseInput]) -> Vec<&CourseInput> {
    let mut ordered: Vec<&CourseInput> = courses.iter().collect();
    ordered.sort_by_key(|c| std::cmp::Reverse(course_priority(&c.course)));
    ordered
}

/// Run every pass (labs, lectures, tutorials, self-study) for one section,
/// mutating its timetable and the shared instructor/room registers in
/// place. Order within and across passes is deterministic except for the
/// slot draws themselves, which come from `rng`.
#[allow(clippy::too_many_arguments)]
pub fn place_section<R: Rng>(
    section: &mut Section,
    courses: &[CourseInput],
    instructors: &mut InstructorRegister,
    rooms: &mut RoomRegister,
    ledger: &mut ElectiveRoomLedger,
    oracle: &ConstraintOracle,
    grid: &TimeGrid,
    constants: &ScheduleConstants,
    rng: &mut R,
) {
    let ordered = ordered_by_priority(courses);
    let semester_base = section.semester.base();
    let department = section.department.0.clone();

    for input in ordered.iter().filter(|c| c.requirement.labs > 0) {
        for _ in 0..input.requirement.labs {
            place_lab(section, input, instructors, rooms, ledger, oracle, grid, constants, semester_base, &department, rng);
        }
    }
    for input in ordered.iter().filter(|c| c.requirement.lectures > 0) {
        for _ in 0..input.requirement.lectures {
            place_random_restart(
                section, input, SessionKind::Lec, instructors, rooms, ledger, oracle, grid, constants, semester_base, &department, rng,
            );
        }
    }
    for input in ordered.iter().filter(|c| c.requirement.tutorials > 0) {
        for _ in 0..input.requirement.tutorials {
            place_random_restart(
                section, input, SessionKind::Tut, instructors, rooms, ledger, oracle, grid, constants, semester_base, &department, rng,
            );
        }
    }
    for input in ordered.iter().filter(|c| c.requirement.self_study > 0) {
        for _ in 0..input.requirement.self_study {
            place_random_restart(
                section, input, SessionKind::Ss, instructors, rooms, ledger, oracle, grid, constants, semester_base, &department, rng,
            );
        }
    }
}

fn commit(
    section: &mut Section,
    instructors: &mut InstructorRegister,
    room: &RoomId,
    course: &Course,
    kind: SessionKind,
    day: usize,
    start: usize,
    duration: usize,
) {
    section.timetable.place(day, start, kind, &course.code, &course.name, &course.faculty, room);
    instructors.reserve(&course.faculty, day, start, duration);
    instructors.record_session(
        &course.faculty,
        day,
        InstructorSession {
            start,
            len: duration,
            kind,
            code: course.code.clone(),
        },
    );
}

/// LEC/TUT/SS: up to `retry_budget` random `(day, start)` draws per session.
#[allow(clippy::too_many_arguments)]
fn place_random_restart<R: Rng>(
    section: &mut Section,
    input: &CourseInput,
    kind: SessionKind,
    instructors: &mut InstructorRegister,
    rooms: &mut RoomRegister,
    ledger: &mut ElectiveRoomLedger,
    oracle: &ConstraintOracle,
    grid: &TimeGrid,
    constants: &ScheduleConstants,
    semester_base: Option<u32>,
    department: &str,
    rng: &mut R,
) -> bool {
    let course = &input.course;
    let duration = kind.slot_length();
    let days = section.timetable.days();
    let slots = section.timetable.slots();
    if duration > slots {
        return false;
    }

    for _ in 0..constants.retry_budget {
        let day = rng.gen_range(0..days);
        let start = rng.gen_range(0..=(slots - duration));

        if matches!(kind, SessionKind::Lec | SessionKind::Tut)
            && !oracle.same_course_spacing(instructors, &course.faculty, &course.code, day, start)
        {
            continue;
        }

        if (start..start + duration).any(|s| oracle.reserved(s, day, semester_base, department)) {
            continue;
        }

        if !oracle.instructor_daily_load(instructors, &course.faculty, day, &course.code) {
            continue;
        }

        let range_ok = section.timetable.range_free(day, start, duration)
            && (start..start + duration).all(|s| !instructors.occupied_slots(&course.faculty, day).contains(&s) && !oracle.is_break(grid, s, semester_base));
        if !range_ok {
            continue;
        }

        if kind == SessionKind::Lec && !oracle.adjacent_lecture_buffer(&section.timetable, day, start, duration) {
            continue;
        }

        let excluded = HashSet::new();
        let req = RoomRequest {
            kind,
            code: &course.code,
            day,
            start,
            required_size: input.enrollment,
            enrollment: input.enrollment,
            excluded: &excluded,
        };
        let Some(alloc) = allocate_room(rooms, ledger, constants, &req) else {
            continue;
        };

        let room = RoomId(alloc.display());
        commit(section, instructors, &room, course, kind, day, start, duration);
        return true;
    }
    false
}

/// LAB: exhaustive day-shuffled enumeration, no retry budget.
#[allow(clippy::too_many_arguments)]
fn place_lab<R: Rng>(
    section: &mut Section,
    input: &CourseInput,
    instructors: &mut InstructorRegister,
    rooms: &mut RoomRegister,
    ledger: &mut ElectiveRoomLedger,
    oracle: &ConstraintOracle,
    grid: &TimeGrid,
    constants: &ScheduleConstants,
    semester_base: Option<u32>,
    department: &str,
    rng: &mut R,
) -> bool {
    let course = &input.course;
    let kind = SessionKind::Lab;
    let duration = kind.slot_length();
    let days = section.timetable.days();
    let slots = section.timetable.slots();
    if duration > slots {
        return false;
    }

    let mut day_order: Vec<usize> = (0..days).collect();
    day_order.shuffle(rng);

    for day in day_order {
        for start in 0..=(slots - duration) {
            if (start..start + duration).any(|s| oracle.reserved(s, day, semester_base, department)) {
                continue;
            }
            let range_ok = section.timetable.range_free(day, start, duration)
                && (start..start + duration).all(|s| !instructors.occupied_slots(&course.faculty, day).contains(&s) && !oracle.is_break(grid, s, semester_base));
            if !range_ok {
                continue;
            }

            let excluded = HashSet::new();
            let req = RoomRequest {
                kind,
                code: &course.code,
                day,
                start,
                required_size: 0,
                enrollment: input.total_students,
                excluded: &excluded,
            };
            if let Some(alloc) = allocate_room(rooms, ledger, constants, &req) {
                let room = RoomId(alloc.display());
                commit(section, instructors, &room, course, kind, day, start, duration);
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::breaks::BreakCalendar;
    use crate::types::{CreditHours, Department, InstructorName, RoomType, Semester};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn course(code: &str, lecture: f64, tutorial: u32, lab: u32) -> Course {
        Course {
            department: Department("CS".into()),
            semester: Semester("4".into()),
            code: CourseCode(code.into()),
            name: "Test".into(),
            faculty: InstructorName("Dr. X".into()),
            credits: CreditHours {
                lecture,
                tutorial,
                lab,
                self_study: 0,
            },
            schedule: true,
        }
    }

    use crate::types::CourseCode;

    #[test]
    fn single_lecture_course_places_two_sessions_on_distinct_days() {
        let constants = ScheduleConstants::default();
        let grid = constants.time_grid();
        let bases: BTreeSet<u32> = [4].into_iter().collect();
        let breaks = BreakCalendar::build(&bases, &constants);
        let oracle = ConstraintOracle::new(&breaks, &constants);

        let mut section = Section::new(Department("CS".into()), Semester("4".into()), String::new(), 60, 5, grid.len());
        let mut instructors = InstructorRegister::new(5);
        let mut rooms = RoomRegister::new(
            vec![crate::types::Room {
                id: RoomId("R1".into()),
                capacity: 60,
                room_type: RoomType::LectureRoom,
                room_number: 101,
            }],
            5,
        );
        let mut ledger = ElectiveRoomLedger::new();

        let input = CourseInput {
            course: course("CS301", 3.0, 0, 0),
            requirement: SessionRequirement {
                lectures: 2,
                tutorials: 0,
                labs: 0,
                self_study: 0,
            },
            enrollment: 60,
            total_students: 60,
        };

        let mut rng = StdRng::seed_from_u64(42);
        place_section(&mut section, &[input], &mut instructors, &mut rooms, &mut ledger, &oracle, &grid, &constants, &mut rng);

        let code = CourseCode("CS301".into());
        assert_eq!(section.timetable.count_placed(&code, SessionKind::Lec), 2);

        let days_used: HashSet<usize> = section
            .timetable
            .iter_starts()
            .filter(|(_, _, cell)| cell.code == code)
            .map(|(day, _, _)| day)
            .collect();
        assert_eq!(days_used.len(), 2);
    }
}

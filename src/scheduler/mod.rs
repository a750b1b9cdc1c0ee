pub mod breaks;
pub mod constraints;
pub mod placement;
pub mod requirements;
pub mod room_allocator;
pub mod unscheduled;

use crate::config::ScheduleConstants;
use crate::parser::CatalogInput;
use crate::types::{section_count, section_label, section_size, Department, GeneratedSchedule, InstructorRegister, RoomRegister, ScheduleMetadata, Section, Semester};
use breaks::BreakCalendar;
use constraints::ConstraintOracle;
use placement::{place_section, CourseInput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use requirements::derive_requirement;
use room_allocator::ElectiveRoomLedger;
use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

/// Run the full pipeline: group the catalog by (department, semester) in
/// the order it was presented, build that group's sections, then place
/// every active course's required sessions into each section in turn.
///
/// `seed` fixes the RNG for reproducible runs (tests, demos); `None` seeds
/// from entropy.
pub fn generate_schedule(input: &CatalogInput, constants: &ScheduleConstants, seed: Option<u64>) -> GeneratedSchedule {
    let start = Instant::now();
    let grid = constants.time_grid();
    let days = constants.days_per_week as usize;

    let bases: BTreeSet<u32> = input.courses.iter().filter_map(|c| c.semester.base()).collect();
    let breaks = BreakCalendar::build(&bases, constants);
    let oracle = ConstraintOracle::new(&breaks, constants);

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut instructors = InstructorRegister::new(days);
    let mut rooms = RoomRegister::new(input.rooms.clone(), days);
    let mut ledger = ElectiveRoomLedger::new();

    let mut group_order: Vec<(Department, Semester)> = Vec::new();
    let mut group_index: HashMap<(Department, Semester), usize> = HashMap::new();
    let mut grouped_courses: Vec<Vec<&crate::types::Course>> = Vec::new();

    for course in input.courses.iter().filter(|c| c.schedule) {
        let key = (course.department.clone(), course.semester.clone());
        let idx = *group_index.entry(key.clone()).or_insert_with(|| {
            group_order.push(key.clone());
            grouped_courses.push(Vec::new());
            group_order.len() - 1
        });
        grouped_courses[idx].push(course);
    }

    let mut sections = Vec::new();
    let mut unscheduled = Vec::new();

    for (key, courses) in group_order.iter().zip(grouped_courses.iter()) {
        let (department, semester) = key.clone();
        let batch = input.batches.get(key);
        let (total_students, max_batch_size) = match batch {
            Some(b) => (b.total_students, b.max_batch_size),
            None => (constants.default_section_size, constants.default_section_size),
        };
        let n_sections = section_count(total_students, max_batch_size.max(1)).max(1);
        let size = section_size(total_students.max(1), n_sections);

        let course_inputs: Vec<CourseInput> = courses
            .iter()
            .map(|course| {
                let requirement = derive_requirement(&course.credits);
                let registered = course.is_elective().then(|| input.elective_registrations.get(&course.code).copied()).flatten();
                let enrollment = registered.unwrap_or(size);
                // Lab oversizing is keyed on the cohort's total enrollment across every
                // section, not on how that cohort happens to be split (§4.1, Scenario B).
                let total_students = registered.unwrap_or(total_students);
                CourseInput {
                    course: (*course).clone(),
                    requirement,
                    enrollment,
                    total_students,
                }
            })
            .collect();

        for section_idx in 0..n_sections {
            let label = section_label(section_idx, n_sections);
            let mut section = Section::new(department.clone(), semester.clone(), label, size, days, grid.len());
            place_section(&mut section, &course_inputs, &mut instructors, &mut rooms, &mut ledger, &oracle, &grid, constants, &mut rng);
            unscheduled.extend(unscheduled::unscheduled_for_section(&section, &course_inputs));
            sections.push(section);
        }
    }

    GeneratedSchedule {
        sections,
        unscheduled,
        metadata: ScheduleMetadata {
            generated_at: chrono::Local::now().to_rfc3339(),
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            solve_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Course, CourseCode, CreditHours, InstructorName, Room, RoomId, RoomType};

    fn course(dept: &str, sem: &str, code: &str, l: f64, t: u32, p: u32) -> Course {
        Course {
            department: Department(dept.into()),
            semester: Semester(sem.into()),
            code: CourseCode(code.into()),
            name: format!("{} course", code),
            faculty: InstructorName(format!("Faculty-{}", code)),
            credits: CreditHours {
                lecture: l,
                tutorial: t,
                lab: p,
                self_study: 0,
            },
            schedule: true,
        }
    }

    #[test]
    fn single_course_catalog_produces_one_section_with_placements() {
        let constants = ScheduleConstants::default();
        let input = CatalogInput {
            courses: vec![course("CS", "4", "CS301", 3.0, 0, 0)],
            rooms: vec![Room {
                id: RoomId("R1".into()),
                capacity: 60,
                room_type: RoomType::LectureRoom,
                room_number: 101,
            }],
            batches: HashMap::new(),
            elective_registrations: HashMap::new(),
        };

        let schedule = generate_schedule(&input, &constants, Some(7));
        assert_eq!(schedule.sections.len(), 1);
        let section = &schedule.sections[0];
        assert_eq!(section.timetable.count_placed(&CourseCode("CS301".into()), crate::types::SessionKind::Lec), 2);
        assert!(schedule.unscheduled.is_empty());
    }

    #[test]
    fn missing_batch_defaults_to_one_section_of_default_size() {
        let constants = ScheduleConstants::default();
        let input = CatalogInput {
            courses: vec![course("EC", "3", "EC201", 3.0, 0, 0)],
            rooms: vec![],
            batches: HashMap::new(),
            elective_registrations: HashMap::new(),
        };
        let schedule = generate_schedule(&input, &constants, Some(1));
        assert_eq!(schedule.sections.len(), 1);
        assert_eq!(schedule.sections[0].size, constants.default_section_size);
    }

    #[test]
    fn grid_too_small_for_a_session_surfaces_as_unscheduled() {
        let mut constants = ScheduleConstants::default();
        constants.day_end = constants.day_start + chrono::Duration::minutes(60);
        constants.days_per_week = 1;

        let input = CatalogInput {
            courses: vec![course("CS", "4", "CS301", 3.0, 0, 0)],
            rooms: vec![],
            batches: HashMap::new(),
            elective_registrations: HashMap::new(),
        };
        let schedule = generate_schedule(&input, &constants, Some(3));
        assert_eq!(schedule.unscheduled.len(), 1);
        assert_eq!(schedule.unscheduled[0].scheduled_slots, 0);
        assert_eq!(schedule.unscheduled[0].expected_slots, 2);
    }
}

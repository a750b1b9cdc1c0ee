use crate::scheduler::placement::CourseInput;
use crate::types::{Section, SessionKind, UnscheduledEntry};

/// For one already-processed section, diff required vs. placed session
/// counts per course and report every course with a positive deficit
/// (§4.6).
pub fn unscheduled_for_section(section: &Section, courses: &[CourseInput]) -> Vec<UnscheduledEntry> {
    courses
        .iter()
        .filter_map(|input| {
            let course = &input.course;
            let scheduled_slots = [SessionKind::Lec, SessionKind::Tut, SessionKind::Lab, SessionKind::Ss]
                .into_iter()
                .map(|kind| section.timetable.count_placed(&course.code, kind))
                .sum::<usize>();
            let expected_slots = input.requirement.total() as usize;

            if scheduled_slots < expected_slots {
                Some(UnscheduledEntry {
                    department: course.department.clone(),
                    semester: course.semester.clone(),
                    code: course.code.clone(),
                    name: course.name.clone(),
                    faculty: course.faculty.clone(),
                    expected_slots,
                    scheduled_slots,
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::requirements::SessionRequirement;
    use crate::types::{CourseCode, CreditHours, Department, InstructorName, Semester};

    fn course_input(lectures: u32) -> CourseInput {
        CourseInput {
            course: crate::types::Course {
                department: Department("CS".into()),
                semester: Semester("4".into()),
                code: CourseCode("CS301".into()),
                name: "Algorithms".into(),
                faculty: InstructorName("Dr. X".into()),
                credits: CreditHours {
                    lecture: 3.0,
                    tutorial: 0,
                    lab: 0,
                    self_study: 0,
                },
                schedule: true,
            },
            requirement: SessionRequirement {
                lectures,
                tutorials: 0,
                labs: 0,
                self_study: 0,
            },
            enrollment: 60,
            total_students: 60,
        }
    }

    #[test]
    fn deficit_surfaces_when_fewer_sessions_placed_than_required() {
        let section = Section::new(Department("CS".into()), Semester("4".into()), String::new(), 60, 5, 19);
        let courses = vec![course_input(5)];
        let unscheduled = unscheduled_for_section(&section, &courses);
        assert_eq!(unscheduled.len(), 1);
        assert_eq!(unscheduled[0].expected_slots, 5);
        assert_eq!(unscheduled[0].scheduled_slots, 0);
        assert_eq!(unscheduled[0].missing_slots(), 5);
    }

    #[test]
    fn fully_placed_course_does_not_appear() {
        let mut section = Section::new(Department("CS".into()), Semester("4".into()), String::new(), 60, 5, 19);
        section.timetable.place(
            0,
            0,
            SessionKind::Lec,
            &CourseCode("CS301".into()),
            "Algorithms",
            &InstructorName("Dr. X".into()),
            &crate::types::RoomId("R1".into()),
        );
        let courses = vec![course_input(1)];
        assert!(unscheduled_for_section(&section, &courses).is_empty());
    }
}

use super::{CourseCode, InstructorName, Room, RoomId, SessionKind};
use std::collections::{HashMap, HashSet};

/// One committed instructor session, kept alongside the raw occupancy set
/// so the constraint oracle can answer "what is this instructor teaching,
/// and of what course" without scanning every section's timetable.
#[derive(Debug, Clone)]
pub struct InstructorSession {
    pub start: usize,
    pub len: usize,
    pub kind: SessionKind,
    pub code: CourseCode,
}

/// Per-instructor, per-day occupancy. Shared across every section of every
/// department — an instructor's slot occupied in one section is visible to
/// all (§5 shared resources).
#[derive(Debug, Default)]
pub struct InstructorRegister {
    days: usize,
    occupied: HashMap<InstructorName, Vec<HashSet<usize>>>,
    sessions: HashMap<InstructorName, Vec<Vec<InstructorSession>>>,
}

impl InstructorRegister {
    pub fn new(days: usize) -> Self {
        Self {
            days,
            occupied: HashMap::new(),
            sessions: HashMap::new(),
        }
    }

    fn entry(&mut self, instructor: &InstructorName) -> &mut Vec<HashSet<usize>> {
        self.occupied
            .entry(instructor.clone())
            .or_insert_with(|| vec![HashSet::new(); self.days])
    }

    fn session_entry(&mut self, instructor: &InstructorName) -> &mut Vec<Vec<InstructorSession>> {
        self.sessions
            .entry(instructor.clone())
            .or_insert_with(|| (0..self.days).map(|_| Vec::new()).collect())
    }

    pub fn occupied_slots(&self, instructor: &InstructorName, day: usize) -> &HashSet<usize> {
        static EMPTY: std::sync::OnceLock<HashSet<usize>> = std::sync::OnceLock::new();
        self.occupied
            .get(instructor)
            .map(|days| &days[day])
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    pub fn is_free(&self, instructor: &InstructorName, day: usize, start: usize, len: usize) -> bool {
        let occupied = self.occupied_slots(instructor, day);
        (start..start + len).all(|s| !occupied.contains(&s))
    }

    pub fn reserve(&mut self, instructor: &InstructorName, day: usize, start: usize, len: usize) {
        let slots = &mut self.entry(instructor)[day];
        slots.extend(start..start + len);
    }

    /// Record the course/kind behind a reservation, for load and spacing checks.
    pub fn record_session(&mut self, instructor: &InstructorName, day: usize, session: InstructorSession) {
        self.session_entry(instructor)[day].push(session);
    }

    pub fn sessions_on_day(&self, instructor: &InstructorName, day: usize) -> &[InstructorSession] {
        self.sessions
            .get(instructor)
            .map(|days| days[day].as_slice())
            .unwrap_or(&[])
    }
}

/// Per-room, per-day occupancy. Shared across all sections. `LIBRARY` rooms
/// are kept in the inventory (for completeness/reporting) but the allocator
/// never assigns them.
#[derive(Debug)]
pub struct RoomRegister {
    rooms: Vec<Room>,
    days: usize,
    occupied: HashMap<RoomId, Vec<HashSet<usize>>>,
}

impl RoomRegister {
    pub fn new(rooms: Vec<Room>, days: usize) -> Self {
        let occupied = rooms
            .iter()
            .map(|r| (r.id.clone(), vec![HashSet::new(); days]))
            .collect();
        Self {
            rooms,
            days,
            occupied,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// True when no room inventory was loaded; the allocator falls back to
    /// the `DEFAULT_ROOM` sentinel in this mode.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn is_free(&self, id: &RoomId, day: usize, start: usize, len: usize) -> bool {
        match self.occupied.get(id) {
            Some(days) => (start..start + len).all(|s| !days[day].contains(&s)),
            None => true,
        }
    }

    pub fn reserve(&mut self, id: &RoomId, day: usize, start: usize, len: usize) {
        let slots = self
            .occupied
            .entry(id.clone())
            .or_insert_with(|| vec![HashSet::new(); self.days])
            .get_mut(day)
            .expect("day index in range");
        slots.extend(start..start + len);
    }

    /// Sum, over all days, of the number of occupied slots — used to rank
    /// elective-eligible rooms by usage (§4.1 elective grouping step 1).
    pub fn weekly_usage(&self, id: &RoomId) -> usize {
        self.occupied
            .get(id)
            .map(|days| days.iter().map(|s| s.len()).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomType;

    #[test]
    fn instructor_register_tracks_per_day_occupancy() {
        let mut reg = InstructorRegister::new(5);
        let dr_x = InstructorName("Dr. X".into());
        assert!(reg.is_free(&dr_x, 0, 2, 3));
        reg.reserve(&dr_x, 0, 2, 3);
        assert!(!reg.is_free(&dr_x, 0, 2, 3));
        assert!(!reg.is_free(&dr_x, 0, 4, 1));
        assert!(reg.is_free(&dr_x, 1, 2, 3));
    }

    #[test]
    fn room_register_weekly_usage_sums_across_days() {
        let rooms = vec![Room {
            id: RoomId("R1".into()),
            capacity: 60,
            room_type: RoomType::LectureRoom,
            room_number: 101,
        }];
        let mut reg = RoomRegister::new(rooms, 5);
        let r1 = RoomId("R1".into());
        reg.reserve(&r1, 0, 0, 3);
        reg.reserve(&r1, 1, 0, 2);
        assert_eq!(reg.weekly_usage(&r1), 5);
    }
}

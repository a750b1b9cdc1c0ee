use crate::config::ScheduleConstants;
use crate::types::{CourseCode, RoomId, RoomRegister, RoomType, SessionKind};
use std::collections::{HashMap, HashSet};

/// What the room allocator handed back for one request (§4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomAllocation {
    Single(RoomId),
    /// Oversized-lab split: both rooms were reserved.
    Paired(RoomId, RoomId),
}

impl RoomAllocation {
    /// The `"A,B"` rendering used in worksheet cells, or the bare id.
    pub fn display(&self) -> String {
        match self {
            RoomAllocation::Single(id) => id.to_string(),
            RoomAllocation::Paired(a, b) => format!("{},{}", a, b),
        }
    }
}

/// One room request (§4.1 inputs).
pub struct RoomRequest<'a> {
    pub kind: SessionKind,
    pub code: &'a CourseCode,
    pub day: usize,
    pub start: usize,
    pub required_size: u32,
    pub enrollment: u32,
    pub excluded: &'a HashSet<RoomId>,
}

/// A lab course's required room type, inferred from its code (no explicit
/// lab-type column in the catalog): `CS`/`DS` codes use computer labs,
/// `EC` codes use hardware labs, everything else defaults to computer lab.
pub fn required_lab_room_type(code: &CourseCode) -> RoomType {
    if code.contains_any(&["EC"]) && !code.contains_any(&["CS", "DS"]) {
        RoomType::HardwareLab
    } else {
        RoomType::ComputerLab
    }
}

/// Tracks, per (elective group, day), which room is already hosting an
/// overlapping session — so a later elective in the same basket reuses it
/// instead of claiming a second room. Replaces the source's opportunistic
/// `basket_group_rooms` bookkeeping with a structure that actually produces
/// the advertised sharing behavior (see DESIGN.md).
#[derive(Debug, Default)]
pub struct ElectiveRoomLedger {
    entries: HashMap<(String, usize), Vec<(usize, usize, RoomId)>>,
}

impl ElectiveRoomLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, group: &str, day: usize, start: usize, end: usize) -> Option<RoomId> {
        self.entries.get(&(group.to_string(), day)).and_then(|windows| {
            windows
                .iter()
                .find(|(s, e, _)| *s < end && start < *e)
                .map(|(_, _, id)| id.clone())
        })
    }

    fn record(&mut self, group: String, day: usize, start: usize, end: usize, room: RoomId) {
        self.entries.entry((group, day)).or_default().push((start, end, room));
    }
}

fn lecture_type_candidates(rooms: &RoomRegister, required_size: u32, excluded: &HashSet<RoomId>, room_type: RoomType) -> Vec<RoomId> {
    rooms
        .rooms()
        .iter()
        .filter(|r| r.room_type == room_type && r.capacity >= required_size && !excluded.contains(&r.id))
        .map(|r| r.id.clone())
        .collect()
}

fn allocate_lecture_type(rooms: &mut RoomRegister, req: &RoomRequest<'_>) -> Option<RoomId> {
    let duration = req.kind.slot_length();
    for room_type in [RoomType::LectureRoom, RoomType::Seater] {
        for id in lecture_type_candidates(rooms, req.required_size, req.excluded, room_type) {
            if rooms.is_free(&id, req.day, req.start, duration) {
                rooms.reserve(&id, req.day, req.start, duration);
                return Some(id);
            }
        }
    }
    None
}

fn allocate_elective(rooms: &mut RoomRegister, ledger: &mut ElectiveRoomLedger, req: &RoomRequest<'_>) -> Option<RoomAllocation> {
    let duration = req.kind.slot_length();
    let end = req.start + duration;
    let group = req.code.elective_group().unwrap_or_default().to_string();

    if let Some(room_id) = ledger.find(&group, req.day, req.start, end) {
        return Some(RoomAllocation::Single(room_id));
    }

    let mut candidates: Vec<RoomId> = rooms
        .rooms()
        .iter()
        .filter(|r| r.room_type.accepts_lecture_type_sessions() && r.capacity >= req.required_size && !req.excluded.contains(&r.id))
        .map(|r| r.id.clone())
        .collect();
    candidates.sort_by_key(|id| rooms.weekly_usage(id));

    for id in candidates {
        if rooms.is_free(&id, req.day, req.start, duration) {
            rooms.reserve(&id, req.day, req.start, duration);
            ledger.record(group, req.day, req.start, end, id.clone());
            return Some(RoomAllocation::Single(id));
        }
    }
    None
}

fn allocate_lab(rooms: &mut RoomRegister, constants: &ScheduleConstants, req: &RoomRequest<'_>) -> Option<RoomAllocation> {
    let duration = req.kind.slot_length();
    let room_type = required_lab_room_type(req.code);

    if req.enrollment > constants.lab_oversize_threshold {
        let same_type: Vec<_> = rooms.rooms().iter().filter(|r| r.room_type == room_type).cloned().collect();
        for a in &same_type {
            for b in &same_type {
                if a.id == b.id || !a.is_adjacent_pair_with(b) {
                    continue;
                }
                if rooms.is_free(&a.id, req.day, req.start, duration) && rooms.is_free(&b.id, req.day, req.start, duration) {
                    rooms.reserve(&a.id, req.day, req.start, duration);
                    rooms.reserve(&b.id, req.day, req.start, duration);
                    return Some(RoomAllocation::Paired(a.id.clone(), b.id.clone()));
                }
            }
        }
    }

    let candidates: Vec<RoomId> = rooms.rooms().iter().filter(|r| r.room_type == room_type).map(|r| r.id.clone()).collect();
    for id in candidates {
        if rooms.is_free(&id, req.day, req.start, duration) {
            rooms.reserve(&id, req.day, req.start, duration);
            return Some(RoomAllocation::Single(id));
        }
    }
    None
}

/// Pick a room (or room pair) for one session placement. Returns `None` if
/// the placement attempt must be abandoned (no eligible room is free).
pub fn allocate_room(
    rooms: &mut RoomRegister,
    ledger: &mut ElectiveRoomLedger,
    constants: &ScheduleConstants,
    req: &RoomRequest<'_>,
) -> Option<RoomAllocation> {
    if rooms.is_empty() {
        return Some(RoomAllocation::Single(RoomId::default_room()));
    }

    match req.kind {
        SessionKind::Lab => allocate_lab(rooms, constants, req),
        _ if req.code.is_elective() => allocate_elective(rooms, ledger, req),
        _ => allocate_lecture_type(rooms, req).map(RoomAllocation::Single),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Room;

    fn lecture_room(id: &str, number: u32) -> Room {
        Room {
            id: RoomId(id.into()),
            capacity: 60,
            room_type: RoomType::LectureRoom,
            room_number: number,
        }
    }

    fn computer_lab(id: &str, number: u32) -> Room {
        Room {
            id: RoomId(id.into()),
            capacity: 40,
            room_type: RoomType::ComputerLab,
            room_number: number,
        }
    }

    #[test]
    fn no_inventory_returns_default_room() {
        let mut rooms = RoomRegister::new(vec![], 5);
        let mut ledger = ElectiveRoomLedger::new();
        let constants = ScheduleConstants::default();
        let excluded = HashSet::new();
        let req = RoomRequest {
            kind: SessionKind::Lec,
            code: &CourseCode("CS301".into()),
            day: 0,
            start: 0,
            required_size: 60,
            enrollment: 60,
            excluded: &excluded,
        };
        let alloc = allocate_room(&mut rooms, &mut ledger, &constants, &req).unwrap();
        assert_eq!(alloc, RoomAllocation::Single(RoomId::default_room()));
    }

    #[test]
    fn oversized_lab_pairs_adjacent_rooms() {
        let mut rooms = RoomRegister::new(vec![computer_lab("201", 201), computer_lab("202", 202)], 5);
        let mut ledger = ElectiveRoomLedger::new();
        let constants = ScheduleConstants::default();
        let excluded = HashSet::new();
        let req = RoomRequest {
            kind: SessionKind::Lab,
            code: &CourseCode("CS401".into()),
            day: 0,
            start: 0,
            required_size: 0,
            enrollment: 70,
            excluded: &excluded,
        };
        let alloc = allocate_room(&mut rooms, &mut ledger, &constants, &req).unwrap();
        assert_eq!(alloc, RoomAllocation::Paired(RoomId("201".into()), RoomId("202".into())));
    }

    #[test]
    fn electives_in_same_group_and_window_share_a_room() {
        let mut rooms = RoomRegister::new(vec![lecture_room("L1", 101), lecture_room("L2", 102)], 5);
        let mut ledger = ElectiveRoomLedger::new();
        let constants = ScheduleConstants::default();
        let excluded = HashSet::new();

        let req_a = RoomRequest {
            kind: SessionKind::Lec,
            code: &CourseCode("B1-A".into()),
            day: 0,
            start: 0,
            required_size: 30,
            enrollment: 30,
            excluded: &excluded,
        };
        let a = allocate_room(&mut rooms, &mut ledger, &constants, &req_a).unwrap();

        let req_b = RoomRequest {
            kind: SessionKind::Lec,
            code: &CourseCode("B1-B".into()),
            day: 0,
            start: 0,
            required_size: 30,
            enrollment: 30,
            excluded: &excluded,
        };
        let b = allocate_room(&mut rooms, &mut ledger, &constants, &req_b).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn lecture_rooms_are_tried_before_seaters() {
        let mut rooms = RoomRegister::new(
            vec![
                Room {
                    id: RoomId("S1".into()),
                    capacity: 60,
                    room_type: RoomType::Seater,
                    room_number: 101,
                },
                lecture_room("L1", 102),
            ],
            5,
        );
        let mut ledger = ElectiveRoomLedger::new();
        let constants = ScheduleConstants::default();
        let excluded = HashSet::new();
        let req = RoomRequest {
            kind: SessionKind::Lec,
            code: &CourseCode("CS301".into()),
            day: 0,
            start: 0,
            required_size: 60,
            enrollment: 60,
            excluded: &excluded,
        };
        let alloc = allocate_room(&mut rooms, &mut ledger, &constants, &req).unwrap();
        assert_eq!(alloc, RoomAllocation::Single(RoomId("L1".into())));
    }
}

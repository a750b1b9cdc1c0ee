use super::RoomId;
use serde::{Deserialize, Serialize};

/// Physical room type, matching the catalog's free-text `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    LectureRoom,
    ComputerLab,
    HardwareLab,
    Seater,
    Library,
}

impl RoomType {
    /// Parse the catalog's free-text room type. `LECTURE_ROOM` and `LEC` are
    /// treated as aliases, per spec.md's §9 resolution of the
    /// `determine_room_type` vs. caller ambiguity.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.to_uppercase();
        if upper.contains("LIBRARY") {
            Some(RoomType::Library)
        } else if upper.contains("HARDWARE_LAB") {
            Some(RoomType::HardwareLab)
        } else if upper.contains("COMPUTER_LAB") {
            Some(RoomType::ComputerLab)
        } else if upper.contains("SEATER") {
            Some(RoomType::Seater)
        } else if upper.contains("LECTURE_ROOM") || upper.contains("LEC") {
            Some(RoomType::LectureRoom)
        } else {
            None
        }
    }

    pub fn accepts_lecture_type_sessions(self) -> bool {
        matches!(self, RoomType::LectureRoom | RoomType::Seater)
    }
}

/// A physical room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub capacity: u32,
    pub room_type: RoomType,
    pub room_number: u32,
}

impl Room {
    /// The tens/hundreds digit of the room number is the floor.
    pub fn floor(&self) -> u32 {
        self.room_number / 100
    }

    /// Two rooms are an adjacent pair iff same floor, same type, numbers differ by 1.
    pub fn is_adjacent_pair_with(&self, other: &Room) -> bool {
        self.room_type == other.room_type
            && self.floor() == other.floor()
            && self.room_number.abs_diff(other.room_number) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types() {
        assert_eq!(RoomType::parse("COMPUTER_LAB"), Some(RoomType::ComputerLab));
        assert_eq!(RoomType::parse("hardware_lab"), Some(RoomType::HardwareLab));
        assert_eq!(RoomType::parse("LIBRARY"), Some(RoomType::Library));
        assert_eq!(RoomType::parse("SEATER"), Some(RoomType::Seater));
    }

    #[test]
    fn adjacent_pair_requires_same_floor_and_type() {
        let a = Room {
            id: RoomId("201".into()),
            capacity: 40,
            room_type: RoomType::ComputerLab,
            room_number: 201,
        };
        let b = Room {
            id: RoomId("202".into()),
            capacity: 40,
            room_type: RoomType::ComputerLab,
            room_number: 202,
        };
        let c = Room {
            id: RoomId("301".into()),
            capacity: 40,
            room_type: RoomType::ComputerLab,
            room_number: 301,
        };
        assert!(a.is_adjacent_pair_with(&b));
        assert!(!a.is_adjacent_pair_with(&c));
    }
}

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Fixed discretization of the working day into uniform slots.
///
/// Mirrors the teacher's `ScheduleConfig`, but the grid here is derived
/// rather than hand-entered, since the spec pins the slot boundaries to a
/// day window rather than a bare period count.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    pub slot_minutes: u32,
    slots: Vec<(NaiveTime, NaiveTime)>,
}

impl TimeGrid {
    /// Build the slot grid for a `[day_start, day_end)` window.
    pub fn new(day_start: NaiveTime, day_end: NaiveTime, slot_minutes: u32) -> Self {
        let mut slots = Vec::new();
        let mut cursor = day_start;
        let step = chrono::Duration::minutes(slot_minutes as i64);
        while cursor < day_end {
            let next = cursor + step;
            slots.push((cursor, next));
            cursor = next;
        }
        Self {
            slot_minutes,
            slots,
        }
    }

    /// Number of 30-minute slots in a day (19 for the default 09:00-18:30 window).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn start_of(&self, slot: usize) -> NaiveTime {
        self.slots[slot].0
    }

    pub fn end_of(&self, slot: usize) -> NaiveTime {
        self.slots[slot].1
    }

    /// `"HH:MM-HH:MM"` header label for a slot.
    pub fn label(&self, slot: usize) -> String {
        format!(
            "{}-{}",
            self.start_of(slot).format("%H:%M"),
            self.end_of(slot).format("%H:%M")
        )
    }
}

/// Tagged variant for a scheduled activity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    Lec,
    Tut,
    Lab,
    Ss,
}

impl SessionKind {
    /// Number of 30-minute slots the session spans.
    pub fn slot_length(self) -> usize {
        match self {
            SessionKind::Lec => 3,
            SessionKind::Lab => 4,
            SessionKind::Tut => 2,
            SessionKind::Ss => 2,
        }
    }

    /// Short label used for codes and worksheet cells (e.g. `"LEC"`).
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Lec => "LEC",
            SessionKind::Tut => "TUT",
            SessionKind::Lab => "LAB",
            SessionKind::Ss => "SS",
        }
    }

    /// Fill color (RGB hex, no `#`) for the worksheet cell, if the kind has one.
    pub fn fill_color(self) -> Option<&'static str> {
        match self {
            SessionKind::Lec => Some("87CEEB"),
            SessionKind::Lab => Some("FAE5D3"),
            SessionKind::Tut => Some("FFB347"),
            SessionKind::Ss => None,
        }
    }

    /// Whether this kind counts toward the instructor's daily lecture/lab/tutorial load.
    pub fn counts_toward_daily_load(self) -> bool {
        matches!(self, SessionKind::Lec | SessionKind::Lab | SessionKind::Tut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_19_slots() {
        let grid = TimeGrid::new(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            30,
        );
        assert_eq!(grid.len(), 19);
        assert_eq!(grid.label(0), "09:00-09:30");
        assert_eq!(grid.label(18), "18:00-18:30");
    }

    #[test]
    fn session_lengths_match_spec() {
        assert_eq!(SessionKind::Lec.slot_length(), 3);
        assert_eq!(SessionKind::Lab.slot_length(), 4);
        assert_eq!(SessionKind::Tut.slot_length(), 2);
        assert_eq!(SessionKind::Ss.slot_length(), 2);
    }
}

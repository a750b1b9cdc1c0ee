use super::{CourseCode, Department, InstructorName, RoomId, Semester, SessionKind};

/// One 30-minute cell of a placed session. Only the first slot of a
/// multi-slot session carries the text fields (§3 Weekly timetable
/// invariant); later slots carry `kind` alone so occupancy checks don't
/// need to look back to the session's start.
#[derive(Debug, Clone)]
pub struct SlotCell {
    pub kind: SessionKind,
    pub code: CourseCode,
    pub name: String,
    pub faculty: InstructorName,
    pub room: RoomId,
}

impl SlotCell {
    fn start(kind: SessionKind, code: CourseCode, name: String, faculty: InstructorName, room: RoomId) -> Self {
        Self {
            kind,
            code,
            name,
            faculty,
            room,
        }
    }

    fn continuation(kind: SessionKind) -> Self {
        Self {
            kind,
            code: CourseCode(String::new()),
            name: String::new(),
            faculty: InstructorName(String::new()),
            room: RoomId(String::new()),
        }
    }

    /// True for the first slot of a session (the one carrying its code).
    pub fn is_start(&self) -> bool {
        !self.code.0.is_empty()
    }
}

/// A section's independent weekly timetable: a `(day, slot)` grid of
/// optional placements.
#[derive(Debug, Clone)]
pub struct Timetable {
    days: usize,
    slots: usize,
    grid: Vec<Vec<Option<SlotCell>>>,
}

impl Timetable {
    pub fn new(days: usize, slots: usize) -> Self {
        Self {
            days,
            slots,
            grid: vec![vec![None; slots]; days],
        }
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn cell(&self, day: usize, slot: usize) -> Option<&SlotCell> {
        self.grid[day][slot].as_ref()
    }

    pub fn is_empty_at(&self, day: usize, slot: usize) -> bool {
        self.grid[day][slot].is_none()
    }

    pub fn kind_at(&self, day: usize, slot: usize) -> Option<SessionKind> {
        self.grid[day][slot].as_ref().map(|c| c.kind)
    }

    /// Whether every slot in `[start, start+len)` on `day` is free.
    pub fn range_free(&self, day: usize, start: usize, len: usize) -> bool {
        start + len <= self.slots && (start..start + len).all(|s| self.is_empty_at(day, s))
    }

    /// Commit a session: the first slot carries full placement info, the
    /// remaining `len - 1` slots carry `kind` alone.
    pub fn place(
        &mut self,
        day: usize,
        start: usize,
        kind: SessionKind,
        code: &CourseCode,
        name: &str,
        faculty: &InstructorName,
        room: &RoomId,
    ) {
        let len = kind.slot_length();
        for i in 0..len {
            let cell = if i == 0 {
                SlotCell::start(
                    kind,
                    code.clone(),
                    name.to_string(),
                    faculty.clone(),
                    room.clone(),
                )
            } else {
                SlotCell::continuation(kind)
            };
            self.grid[day][start + i] = Some(cell);
        }
    }

    /// Count sessions of `kind` whose code matches, across the whole week.
    pub fn count_placed(&self, code: &CourseCode, kind: SessionKind) -> usize {
        let mut n = 0;
        for day in 0..self.days {
            for slot in 0..self.slots {
                if let Some(cell) = &self.grid[day][slot] {
                    if cell.is_start() && cell.kind == kind && &cell.code == code {
                        n += 1;
                    }
                }
            }
        }
        n
    }

    /// Iterate over session starts `(day, slot, cell)` in grid order, for rendering.
    pub fn iter_starts(&self) -> impl Iterator<Item = (usize, usize, &SlotCell)> {
        (0..self.days).flat_map(move |day| {
            (0..self.slots).filter_map(move |slot| {
                self.grid[day][slot]
                    .as_ref()
                    .filter(|c| c.is_start())
                    .map(move |c| (day, slot, c))
            })
        })
    }
}

/// A course offered to one or more sections of a (Department, Semester),
/// each owning an independent weekly timetable.
#[derive(Debug, Clone)]
pub struct Section {
    pub department: Department,
    pub semester: Semester,
    /// Section label suffix (`""` when there is only one section, else `"A"`, `"B"`, ...).
    pub label: String,
    pub size: u32,
    pub timetable: Timetable,
}

impl Section {
    pub fn new(department: Department, semester: Semester, label: String, size: u32, days: usize, slots: usize) -> Self {
        Self {
            department,
            semester,
            label,
            size,
            timetable: Timetable::new(days, slots),
        }
    }

    /// Worksheet title: `<Dept><Sem>` or `<Dept><Sem>_<label>`.
    pub fn title(&self) -> String {
        if self.label.is_empty() {
            format!("{}{}", self.department, self.semester)
        } else {
            format!("{}{}_{}", self.department, self.semester, self.label)
        }
    }
}

/// `ceil(total / max_batch_size)` sections, `ceil(total / sections)` per section.
pub fn section_count(total_students: u32, max_batch_size: u32) -> u32 {
    if max_batch_size == 0 {
        return 1;
    }
    (total_students + max_batch_size - 1) / max_batch_size
}

pub fn section_size(total_students: u32, sections: u32) -> u32 {
    if sections == 0 {
        return total_students;
    }
    (total_students + sections - 1) / sections
}

/// Section label for the `n`-th (0-based) section out of `total`: `""` if
/// `total == 1`, else `"A"`, `"B"`, ...
pub fn section_label(index: u32, total: u32) -> String {
    if total <= 1 {
        String::new()
    } else {
        char::from(b'A' + index as u8).to_string()
    }
}

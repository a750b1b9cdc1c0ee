use crate::error::{Result, SchedulerError};
use crate::types::{Course, CourseCode, CreditHours, Department, InstructorName, Room, RoomId, RoomType, Semester};
use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// `updated_batches.csv` row, aggregated by (department, semester).
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchInfo {
    pub total_students: u32,
    pub max_batch_size: u32,
}

/// Everything the scheduler needs, assembled from the four catalog files.
#[derive(Debug, Default)]
pub struct CatalogInput {
    pub courses: Vec<Course>,
    pub rooms: Vec<Room>,
    pub batches: HashMap<(Department, Semester), BatchInfo>,
    pub elective_registrations: HashMap<CourseCode, u32>,
}

/// Load `combined.csv`, `rooms.csv`, `updated_batches.csv`, and
/// `elective_registration.csv` from `dir`. The catalog is required; the
/// other three fall back to empty collections (§7 missing-optional-input).
pub fn load_catalog_dir(dir: &Path) -> Result<CatalogInput> {
    let courses = load_combined_csv(&dir.join("combined.csv"))?;
    let rooms = load_rooms_csv(&dir.join("rooms.csv"))?;
    let batches = load_batches_csv(&dir.join("updated_batches.csv"))?;
    let elective_registrations = load_electives_csv(&dir.join("elective_registration.csv"))?;

    Ok(CatalogInput {
        courses,
        rooms,
        batches,
        elective_registrations,
    })
}

/// Decode a file trying utf-8-sig, utf-8, then cp1252, the order the
/// catalogs have historically arrived in.
fn decode_with_fallback(path: &Path) -> Result<String> {
    let path_str = path.display().to_string();
    let bytes = fs::read(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    if let Some(stripped) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        if let Ok(text) = std::str::from_utf8(stripped) {
            return Ok(text.to_string());
        }
    }
    if let Ok(text) = std::str::from_utf8(&bytes) {
        return Ok(text.to_string());
    }
    let (text, _, had_errors) = WINDOWS_1252.decode(&bytes);
    if !had_errors {
        return Ok(text.into_owned());
    }

    Err(SchedulerError::EncodingExhausted { path: path_str }.into())
}

/// A blank credit cell means "none", not "malformed" (§7) — the original
/// coerces missing/blank numerics to 0 rather than rejecting the row
/// (`pd.notna(...) else 0`).
fn blank_as_zero<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr + Default,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    Ok(if trimmed.is_empty() {
        T::default()
    } else {
        trimmed.parse().unwrap_or_default()
    })
}

#[derive(Debug, Deserialize)]
struct CombinedRow {
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Semester")]
    semester: String,
    #[serde(rename = "Course Code")]
    course_code: String,
    #[serde(rename = "Course Name")]
    course_name: String,
    #[serde(rename = "Faculty")]
    faculty: String,
    #[serde(rename = "L", deserialize_with = "blank_as_zero")]
    l: f64,
    #[serde(rename = "T", deserialize_with = "blank_as_zero")]
    t: u32,
    #[serde(rename = "P", deserialize_with = "blank_as_zero")]
    p: u32,
    #[serde(rename = "S", deserialize_with = "blank_as_zero")]
    s: u32,
    #[serde(rename = "Schedule", default)]
    schedule: Option<String>,
}

fn is_active(schedule: &Option<String>) -> bool {
    match schedule {
        None => true,
        Some(s) if s.trim().is_empty() => true,
        Some(s) => s.trim().eq_ignore_ascii_case("yes"),
    }
}

fn load_combined_csv(path: &Path) -> Result<Vec<Course>> {
    if !path.exists() {
        return Err(SchedulerError::MissingRequiredInput {
            path: path.display().to_string(),
        }
        .into());
    }

    let text = decode_with_fallback(path)?;
    let mut reader = ReaderBuilder::new().from_reader(text.as_bytes());
    let mut courses = Vec::new();

    for record in reader.deserialize() {
        let row: CombinedRow = record.map_err(|e| SchedulerError::CsvParse {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;

        courses.push(Course {
            department: Department(row.department),
            semester: Semester(row.semester),
            code: CourseCode(row.course_code),
            name: row.course_name,
            faculty: InstructorName::select(&row.faculty),
            credits: CreditHours {
                lecture: row.l,
                tutorial: row.t,
                lab: row.p,
                self_study: row.s,
            },
            schedule: is_active(&row.schedule),
        });
    }

    if courses.is_empty() {
        return Err(SchedulerError::EmptyCatalog {
            path: path.display().to_string(),
        }
        .into());
    }

    Ok(courses)
}

#[derive(Debug, Deserialize)]
struct RoomRow {
    id: String,
    capacity: u32,
    #[serde(rename = "type")]
    room_type: String,
    #[serde(rename = "roomNumber")]
    room_number: u32,
}

fn load_rooms_csv(path: &Path) -> Result<Vec<Room>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let text = decode_with_fallback(path)?;
    let mut reader = ReaderBuilder::new().from_reader(text.as_bytes());
    let mut rooms = Vec::new();

    for record in reader.deserialize() {
        let row: RoomRow = record.map_err(|e| SchedulerError::CsvParse {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;

        let Some(room_type) = RoomType::parse(&row.room_type) else {
            continue;
        };

        rooms.push(Room {
            id: RoomId(row.id),
            capacity: row.capacity,
            room_type,
            room_number: row.room_number,
        });
    }

    Ok(rooms)
}

#[derive(Debug, Deserialize)]
struct BatchRow {
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Semester")]
    semester: String,
    #[serde(rename = "Total_Students")]
    total_students: u32,
    #[serde(rename = "MaxBatchSize")]
    max_batch_size: u32,
}

fn load_batches_csv(path: &Path) -> Result<HashMap<(Department, Semester), BatchInfo>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let text = decode_with_fallback(path)?;
    let mut reader = ReaderBuilder::new().from_reader(text.as_bytes());
    let mut batches = HashMap::new();

    for record in reader.deserialize() {
        let row: BatchRow = record.map_err(|e| SchedulerError::CsvParse {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;

        batches.insert(
            (Department(row.department), Semester(row.semester)),
            BatchInfo {
                total_students: row.total_students,
                max_batch_size: row.max_batch_size,
            },
        );
    }

    Ok(batches)
}

#[derive(Debug, Deserialize)]
struct ElectiveRow {
    #[serde(rename = "Course Code")]
    course_code: String,
    #[serde(rename = "Total Students")]
    total_students: u32,
}

fn load_electives_csv(path: &Path) -> Result<HashMap<CourseCode, u32>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let text = decode_with_fallback(path)?;
    let mut reader = ReaderBuilder::new().from_reader(text.as_bytes());
    let mut registrations = HashMap::new();

    for record in reader.deserialize() {
        let row: ElectiveRow = record.map_err(|e| SchedulerError::CsvParse {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;
        registrations.insert(CourseCode(row.course_code), row.total_students);
    }

    Ok(registrations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> tempfile_path::TempPath {
        tempfile_path::TempPath::new(name, content)
    }

    mod tempfile_path {
        use std::path::{Path, PathBuf};

        pub struct TempPath {
            path: PathBuf,
        }

        impl TempPath {
            pub fn new(name: &str, content: &str) -> Self {
                let mut path = std::env::temp_dir();
                path.push(format!("uni_timetabler_test_{}_{}", std::process::id(), name));
                std::fs::write(&path, content).unwrap();
                Self { path }
            }

            pub fn as_path(&self) -> &Path {
                &self.path
            }
        }

        impl Drop for TempPath {
            fn drop(&mut self) {
                let _ = std::fs::remove_file(&self.path);
            }
        }
    }

    #[test]
    fn combined_csv_parses_schedule_flag_defaults() {
        let csv = "Department,Semester,Course Code,Course Name,Faculty,L,T,P,S,C,Schedule\nCS,4,CS301,Algorithms,Dr. X,3,0,0,0,3,\nCS,4,CS302,Systems,Dr. Y,3,0,0,0,3,NO\n";
        let tmp = write_temp("combined.csv", csv);
        let courses = load_combined_csv(tmp.as_path()).unwrap();
        assert_eq!(courses.len(), 2);
        assert!(courses[0].schedule);
        assert!(!courses[1].schedule);
    }

    #[test]
    fn blank_credit_cells_coerce_to_zero() {
        let csv = "Department,Semester,Course Code,Course Name,Faculty,L,T,P,S,C,Schedule\nCS,4,CS301,Algorithms,Dr. X,3,,,,3,\n";
        let tmp = write_temp("blank_credits.csv", csv);
        let courses = load_combined_csv(tmp.as_path()).unwrap();
        assert_eq!(courses[0].credits.lecture, 3.0);
        assert_eq!(courses[0].credits.tutorial, 0);
        assert_eq!(courses[0].credits.lab, 0);
        assert_eq!(courses[0].credits.self_study, 0);
    }

    #[test]
    fn faculty_alternatives_select_first() {
        let csv = "Department,Semester,Course Code,Course Name,Faculty,L,T,P,S,C,Schedule\nCS,4,CS301,Algorithms,Dr. X / Dr. Y,3,0,0,0,3,\n";
        let tmp = write_temp("faculty.csv", csv);
        let courses = load_combined_csv(tmp.as_path()).unwrap();
        assert_eq!(courses[0].faculty.0, "Dr. X");
    }

    #[test]
    fn missing_catalog_is_a_hard_error() {
        let missing = Path::new("/nonexistent/combined.csv");
        assert!(load_combined_csv(missing).is_err());
    }

    #[test]
    fn missing_rooms_file_yields_empty_inventory() {
        let missing = Path::new("/nonexistent/rooms.csv");
        assert!(load_rooms_csv(missing).unwrap().is_empty());
    }

    #[test]
    fn rooms_csv_parses_type_and_number() {
        let csv = "id,capacity,type,roomNumber\nR1,40,COMPUTER_LAB,201\n";
        let tmp = write_temp("rooms.csv", csv);
        let rooms = load_rooms_csv(tmp.as_path()).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_number, 201);
    }
}

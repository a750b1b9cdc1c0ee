//! Weekly academic timetable generator for a multi-department university.
//!
//! Given a course catalog, a room inventory, and enrollment figures, this
//! crate produces a conflict-free assignment of course sessions to
//! `(day, time-slot, room)` triples, subject to instructor, room, and
//! pedagogical constraints.
//!
//! # Pipeline
//!
//! For each (department, semester, section), `scheduler::generate_schedule`
//! runs four passes in order — labs, lectures, tutorials, self-study —
//! consulting the constraint oracle and room allocator, and mutating the
//! section timetable plus the shared instructor/room registers as it goes.
//! Sessions that exhaust their retry budget are dropped silently and surface
//! later in the unscheduled report.
//!
//! # Example
//!
//! ```no_run
//! use uni_timetabler::config::ScheduleConstants;
//! use uni_timetabler::parser::load_catalog_dir;
//! use uni_timetabler::scheduler::generate_schedule;
//! use std::path::Path;
//!
//! let input = load_catalog_dir(Path::new("./data")).unwrap();
//! let constants = ScheduleConstants::default();
//! let schedule = generate_schedule(&input, &constants, None);
//! println!("{} sections, {} unscheduled", schedule.sections.len(), schedule.unscheduled.len());
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod scheduler;
pub mod types;

pub use error::{Result, SchedulerError};

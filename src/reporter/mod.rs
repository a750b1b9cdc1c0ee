//! Workbook and console output for a generated schedule (§6).

use crate::config::ScheduleConstants;
use crate::error::{Result, SchedulerError};
use crate::scheduler::breaks::BreakCalendar;
use crate::types::{GeneratedSchedule, SessionKind, TimeGrid};
use colored::Colorize;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const MAX_FILENAME_ATTEMPTS: u32 = 100;

/// Write `timetable_all.xlsx`: one worksheet per section, plus a global
/// unscheduled-courses summary. If the target path is locked (the file is
/// open elsewhere), retries with numeric suffixes before giving up.
///
/// `constants` rebuilds the same time grid and break calendar the scheduler
/// placed against, so the workbook's headers and `BREAK` cells line up with
/// §6's output contract.
pub fn write_workbook(schedule: &GeneratedSchedule, output_dir: &Path, constants: &ScheduleConstants) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|e| SchedulerError::FileRead {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let grid = constants.time_grid();
    let bases: BTreeSet<u32> = schedule.sections.iter().filter_map(|s| s.semester.base()).collect();
    let breaks = BreakCalendar::build(&bases, constants);

    let mut workbook = Workbook::new();
    for section in &schedule.sections {
        let sheet = build_section_sheet(section, &grid, &breaks);
        workbook.push_worksheet(sheet);
    }
    build_unscheduled_sheet(&mut workbook, schedule);

    save_with_retry(&mut workbook, output_dir)
}

fn save_with_retry(workbook: &mut Workbook, output_dir: &Path) -> Result<PathBuf> {
    let base = output_dir.join("timetable_all.xlsx");
    if workbook.save(&base).is_ok() {
        return Ok(base);
    }

    for attempt in 1..MAX_FILENAME_ATTEMPTS {
        let candidate = output_dir.join(format!("timetable_all_{}.xlsx", attempt));
        if workbook.save(&candidate).is_ok() {
            return Ok(candidate);
        }
    }

    Err(SchedulerError::WorkbookLocked {
        attempts: MAX_FILENAME_ATTEMPTS,
    }
    .into())
}

fn build_section_sheet(section: &crate::types::Section, grid: &TimeGrid, breaks: &BreakCalendar) -> Worksheet {
    let mut sheet = Worksheet::new();
    sheet.set_name(section.title()).ok();

    let header_fmt = Format::new().set_bold().set_align(FormatAlign::Center).set_border(FormatBorder::Thin);
    let slots = section.timetable.slots();
    let semester_base = section.semester.base();

    sheet.write_string(0, 0, "Day/Time").ok();
    for slot in 0..slots {
        sheet.write_string_with_format(0, (slot + 1) as u16, &grid.label(slot), &header_fmt).ok();
    }

    const DAY_NAMES: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
    let break_fmt = Format::new().set_align(FormatAlign::Center).set_border(FormatBorder::Thin).set_background_color("D3D3D3");
    let mut written: std::collections::HashSet<(usize, usize)> = std::collections::HashSet::new();

    for day in 0..section.timetable.days() {
        let row = (day + 1) as u32;
        let day_name = DAY_NAMES.get(day).copied().unwrap_or("Day");
        sheet.write_string_with_format(row, 0, day_name, &header_fmt).ok();

        for slot in 0..slots {
            if written.contains(&(day, slot)) {
                continue;
            }
            let Some(cell) = section.timetable.cell(day, slot) else {
                if breaks.is_break(grid, slot, semester_base) {
                    sheet.write_string_with_format(row, (slot + 1) as u16, "BREAK", &break_fmt).ok();
                }
                continue;
            };
            if !cell.is_start() {
                continue;
            }

            let length = cell.kind.slot_length();
            for offset in 0..length {
                written.insert((day, slot + offset));
            }

            let text = format!("{} {}\n{}\n{}", cell.code, cell.kind.label(), cell.room, cell.faculty);
            let mut fmt = Format::new().set_text_wrap().set_align(FormatAlign::Center).set_border(FormatBorder::Thin);
            if let Some(color) = cell.kind.fill_color() {
                fmt = fmt.set_background_color(color);
            }

            let col = (slot + 1) as u16;
            if length > 1 {
                let last_col = (slot + length) as u16;
                sheet.merge_range(row, col, row, last_col, &text, &fmt).ok();
            } else {
                sheet.write_string_with_format(row, col, &text, &fmt).ok();
            }
        }
    }

    sheet
}

fn build_unscheduled_sheet(workbook: &mut Workbook, schedule: &GeneratedSchedule) {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Unscheduled Summary").ok();

    let header_fmt = Format::new().set_bold().set_border(FormatBorder::Thin);
    for (col, title) in ["Department", "Semester", "Code", "Name", "Faculty", "Expected", "Scheduled", "Missing"].iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header_fmt).ok();
    }

    for (row, entry) in schedule.unscheduled.iter().enumerate() {
        let r = (row + 1) as u32;
        sheet.write_string(r, 0, entry.department.to_string()).ok();
        sheet.write_string(r, 1, entry.semester.to_string()).ok();
        sheet.write_string(r, 2, entry.code.to_string()).ok();
        sheet.write_string(r, 3, &entry.name).ok();
        sheet.write_string(r, 4, entry.faculty.to_string()).ok();
        sheet.write_number(r, 5, entry.expected_slots as f64).ok();
        sheet.write_number(r, 6, entry.scheduled_slots as f64).ok();
        sheet.write_number(r, 7, entry.missing_slots() as f64).ok();
    }
}

/// Print a short colored summary of the run to stdout.
pub fn print_summary(schedule: &GeneratedSchedule) {
    println!("{}", "Schedule generation complete".bold().green());
    println!("{}", "─".repeat(40));
    println!("Sections produced : {}", schedule.sections.len());
    println!("Solve time        : {} ms", schedule.metadata.solve_time_ms);
    println!("Generated at      : {}", schedule.metadata.generated_at);

    let placed: usize = schedule
        .sections
        .iter()
        .map(|s| s.timetable.iter_starts().count())
        .sum();
    println!("Sessions placed   : {}", placed);

    if schedule.unscheduled.is_empty() {
        println!("{}", "Unscheduled       : none".green());
    } else {
        let missing: usize = schedule.unscheduled.iter().map(|u| u.missing_slots()).sum();
        println!("{}", format!("Unscheduled       : {} course(s), {} session(s) missing", schedule.unscheduled.len(), missing).yellow());
        for entry in &schedule.unscheduled {
            println!(
                "  {} {} — {} ({}/{} sessions placed)",
                entry.department, entry.semester, entry.code, entry.scheduled_slots, entry.expected_slots
            );
        }
    }

    let lec_count = count_kind(schedule, SessionKind::Lec);
    let lab_count = count_kind(schedule, SessionKind::Lab);
    let tut_count = count_kind(schedule, SessionKind::Tut);
    let ss_count = count_kind(schedule, SessionKind::Ss);
    println!("  LEC: {}  LAB: {}  TUT: {}  SS: {}", lec_count, lab_count, tut_count, ss_count);
}

fn count_kind(schedule: &GeneratedSchedule, kind: SessionKind) -> usize {
    schedule
        .sections
        .iter()
        .flat_map(|s| s.timetable.iter_starts())
        .filter(|(_, _, cell)| cell.kind == kind)
        .count()
}

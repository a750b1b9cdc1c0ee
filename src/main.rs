use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use uni_timetabler::config::ScheduleConstants;
use uni_timetabler::parser::load_catalog_dir;
use uni_timetabler::reporter::{print_summary, write_workbook};
use uni_timetabler::scheduler::generate_schedule;

/// Generate every department's weekly timetable from a catalog directory.
#[derive(Parser)]
#[command(name = "uni-timetabler")]
#[command(about = "Constraint-based weekly academic timetable generator")]
#[command(version)]
struct Cli {
    /// Directory containing combined.csv, rooms.csv, updated_batches.csv, elective_registration.csv
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    /// Output directory for the generated workbook
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Fix the RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("{}", "University Timetable Generator".bold().cyan());
    println!("{}", "─".repeat(40));
    println!("Loading catalog from: {}", cli.data.display());

    let input = load_catalog_dir(&cli.data).context("Failed to load catalog")?;
    println!(
        "Loaded {} course(s), {} room(s), {} batch record(s), {} elective registration(s)",
        input.courses.len(),
        input.rooms.len(),
        input.batches.len(),
        input.elective_registrations.len()
    );

    let constants = ScheduleConstants::default();

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    progress.set_message("Placing course sessions...");
    progress.enable_steady_tick(std::time::Duration::from_millis(120));

    let schedule = generate_schedule(&input, &constants, cli.seed);

    progress.finish_and_clear();
    print_summary(&schedule);

    let path = write_workbook(&schedule, &cli.output, &constants).context("Failed to write workbook")?;
    println!("\nWorkbook written to: {}", path.display().to_string().green());

    Ok(())
}

use clap::{Parser, Subcommand};
use rc_app::{
    AppError, AppResult, QuickSolveRequest, RunOptions, RunReport, project_service, quick_solve,
    run_service,
};
use rc_sizing::{DisplaySlots, OutputSlot, UnitCapacity};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(about = "RefCap CLI - Refrigeration capacity sizing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size one room from form values
    Solve {
        /// Estimated thermal load in TR (comma decimals accepted)
        #[arg(long)]
        load: String,
        /// Safety factor in percent
        #[arg(long, default_value = "10")]
        safety: String,
        /// Unit capacity in TR
        #[arg(long, default_value = "5")]
        unit: String,
        /// Backup policy: N, N+1 or N+2
        #[arg(long, default_value = "N")]
        backup: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay a scenario file against the capacity panel
    Simulate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Stop the clock at this time instead of running until idle
        #[arg(long)]
        until_ms: Option<u64>,
        /// Override the constants poll budget
        #[arg(long)]
        max_attempts: Option<u32>,
        /// Override the backup mirror debounce
        #[arg(long)]
        debounce_ms: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List rooms in a project
    Rooms {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List the unit capacity catalog
    Units,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            load,
            safety,
            unit,
            backup,
            json,
        } => cmd_solve(
            &QuickSolveRequest {
                estimated_load: &load,
                safety_factor_percent: &safety,
                unit_capacity_tr: &unit,
                backup_policy: &backup,
            },
            json,
        ),
        Commands::Simulate {
            project_path,
            until_ms,
            max_attempts,
            debounce_ms,
            json,
        } => cmd_simulate(
            &project_path,
            &RunOptions {
                until_ms,
                max_attempts,
                sync_debounce_ms: debounce_ms,
            },
            json,
        ),
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Rooms { project_path } => cmd_rooms(&project_path),
        Commands::Units => cmd_units(),
    }
}

fn cmd_solve(request: &QuickSolveRequest<'_>, json: bool) -> AppResult<()> {
    let result = quick_solve(request)?;
    tracing::debug!(idle = result.outcome.is_idle(), "quick solve");
    if json {
        return print_json(&result);
    }
    print_slots(&result.slots, "");
    Ok(())
}

fn cmd_simulate(project_path: &Path, options: &RunOptions, json: bool) -> AppResult<()> {
    let report = run_service::run_project_file(project_path, options)?;
    tracing::info!(
        project = %report.project,
        ended_at_ms = report.ended_at_ms,
        rooms = report.rooms.len(),
        inconsistencies = report.inconsistencies.len(),
        "simulation finished"
    );
    if json {
        return print_json(&report);
    }
    print_report(&report);
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    tracing::info!(
        path = %project_path.display(),
        version = project.version,
        rooms = project.rooms.len(),
        events = project.timeline.len(),
        "project valid"
    );
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_rooms(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let rooms = project_service::list_rooms(&project);

    if rooms.is_empty() {
        println!("No rooms found in project");
    } else {
        println!("Rooms in project:");
        for room in rooms {
            let readings = if room.has_readings {
                "readings"
            } else {
                "no readings"
            };
            println!(
                "  {} - {} ({}, {} timeline events)",
                room.id, room.name, readings, room.timeline_events
            );
        }
    }
    Ok(())
}

fn cmd_units() -> AppResult<()> {
    println!("Unit capacities:");
    for unit in UnitCapacity::ALL {
        println!("  {:>8}  {:>9.0} W", unit.label(), unit.power().value);
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "Project: {} (t = {} ms, {} events applied)",
        report.project, report.ended_at_ms, report.events_applied
    );
    for room in &report.rooms {
        println!();
        println!("Room {} [{:?}]", room.room_id, room.phase);
        println!(
            "  safety factor: {}, unit: {}, backup: {}",
            room.safety_factor_percent
                .map(|p| format!("{p} %"))
                .unwrap_or_else(|| "-".to_string()),
            room.unit_capacity
                .map(|t| format!("{t} TR"))
                .unwrap_or_else(|| "-".to_string()),
            room.backup_policy
        );
        print_slots(&room.slots, "  ");
    }
    if !report.inconsistencies.is_empty() {
        println!();
        for line in &report.inconsistencies {
            println!("✗ {line}");
        }
    }
}

fn print_slots(slots: &DisplaySlots, indent: &str) {
    for slot in OutputSlot::ALL {
        println!("{indent}{:<18} {}", slot.key(), slots.get(slot));
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::InvalidInput(format!("Failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}

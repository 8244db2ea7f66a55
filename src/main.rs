//! CLI entry point for the deliberation tool.
//!
//! Provides subcommands for deliberating a session (computing per-student
//! averages and decisions, optionally across two semesters) and for
//! validating a grades CSV before import.

use anyhow::Result;
use clap::{Parser, Subcommand};
use deliberation::import::read_grade_rows;
use deliberation::output::{DeliberationReport, append_record, write_report};
use deliberation::session::{Session, combine_year};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "deliberation")]
#[command(about = "A tool to deliberate academic sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute per-student averages and decisions for a session
    Deliberate {
        /// Path to the session JSON file
        #[arg(value_name = "SESSION")]
        session: String,

        /// Grades CSV merged over the session's own grade records
        #[arg(short, long)]
        notes: Option<String>,

        /// Second-semester session JSON; switches to an annual decision
        #[arg(long)]
        second: Option<String>,

        /// Grades CSV for the second-semester session
        #[arg(long)]
        notes2: Option<String>,

        /// CSV file to append result rows to
        #[arg(short, long, default_value = "resultats.csv")]
        output: String,

        /// JSON report file
        #[arg(short, long, default_value = "rapport.json")]
        report: String,
    },
    /// Validate a grades CSV against a session and report rejected rows
    CheckNotes {
        /// Path to the session JSON file
        #[arg(value_name = "SESSION")]
        session: String,

        /// Path to the grades CSV file
        #[arg(value_name = "NOTES_CSV")]
        notes: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/deliberation.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("deliberation.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Deliberate {
            session,
            notes,
            second,
            notes2,
            output,
            report,
        } => {
            deliberate(&session, notes.as_deref(), second.as_deref(), notes2.as_deref(), &output, &report)?;
        }
        Commands::CheckNotes { session, notes } => {
            check_notes(&session, &notes)?;
        }
    }

    Ok(())
}

/// Loads a session file and merges an optional grades CSV into it.
#[tracing::instrument(skip(notes), fields(path))]
fn load_session(path: &str, notes: Option<&str>) -> Result<Session> {
    let mut session = Session::load(path)?;

    if let Some(notes_path) = notes {
        let report = read_grade_rows(notes_path, &session)?;
        if !report.is_clean() {
            warn!(
                rejected = report.rejected.len(),
                notes_path, "Some grade rows were rejected; see previous warnings"
            );
        }
        info!(
            accepted = report.accepted.len(),
            notes_path, "Grades merged into session"
        );
        session.add_grades(report.accepted);
    }

    Ok(session)
}

/// Runs the deliberation and writes the CSV rows and JSON report.
#[tracing::instrument(skip(notes, second, notes2), fields(session_path, output, report_path))]
fn deliberate(
    session_path: &str,
    notes: Option<&str>,
    second: Option<&str>,
    notes2: Option<&str>,
    output: &str,
    report_path: &str,
) -> Result<()> {
    let session = load_session(session_path, notes)?;

    match second {
        None => {
            let results = session.deliberate_all();

            for row in &results {
                append_record(output, row)?;
            }

            let admitted = results
                .iter()
                .filter(|r| matches!(r.decision, Some("D" | "S" | "P" | "R")))
                .count();
            let retakes = results
                .iter()
                .filter(|r| r.decision == Some("AUE"))
                .count();
            let failed = results.iter().filter(|r| r.decision == Some("A")).count();

            info!(
                students = results.len(),
                admitted, retakes, failed, "Semester deliberation complete"
            );

            let report = DeliberationReport {
                generated_at: chrono::Utc::now(),
                academic_year: session.academic_year.clone(),
                semester: session.semester.clone(),
                program: session.program.clone(),
                level: session.level.clone(),
                results,
            };
            write_report(report_path, &report)?;
        }
        Some(second_path) => {
            let second_session = load_session(second_path, notes2)?;
            let results = combine_year(&session, &second_session);

            for row in &results {
                append_record(output, row)?;
            }

            let admitted = results
                .iter()
                .filter(|r| matches!(r.decision, Some("D" | "S" | "P" | "R")))
                .count();
            let retakes = results
                .iter()
                .filter(|r| r.decision == Some("AUE"))
                .count();
            let failed = results.iter().filter(|r| r.decision == Some("A")).count();

            info!(
                students = results.len(),
                admitted, retakes, failed, "Annual deliberation complete"
            );

            let report = DeliberationReport {
                generated_at: chrono::Utc::now(),
                academic_year: session.academic_year.clone(),
                semester: format!("{} + {}", session.semester, second_session.semester),
                program: session.program.clone(),
                level: session.level.clone(),
                results,
            };
            write_report(report_path, &report)?;
        }
    }

    Ok(())
}

/// Validates a grades CSV against a session and prints the rejection report.
#[tracing::instrument(fields(session_path, notes_path))]
fn check_notes(session_path: &str, notes_path: &str) -> Result<()> {
    let session = Session::load(session_path)?;
    let report = read_grade_rows(notes_path, &session)?;

    for rejected in &report.rejected {
        warn!(line = rejected.line, reason = %rejected.reason, "Rejected row");
    }

    info!(
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        clean = report.is_clean(),
        "Grades file checked"
    );

    Ok(())
}

//! Output formatting and persistence for deliberation results.
//!
//! Supports pretty-printing, JSON report files, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Deliberation report written as a JSON file next to the CSV rows.
#[derive(Serialize)]
pub struct DeliberationReport<T: Serialize> {
    pub generated_at: DateTime<Utc>,
    pub academic_year: String,
    pub semester: String,
    pub program: String,
    pub level: String,
    pub results: Vec<T>,
}

/// Logs a result using Rust's debug pretty-print format.
pub fn print_pretty(row: &impl std::fmt::Debug) {
    debug!("{:#?}", row);
}

/// Logs a result as pretty-printed JSON.
pub fn print_json(row: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(row)?);
    Ok(())
}

/// Appends a result row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, row: &impl Serialize) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}

/// Serializes a report to pretty-printed JSON and writes it to a file.
pub fn write_report(path: &str, report: &impl Serialize) -> Result<()> {
    let body = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, body)?;

    info!(path, "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StudentResult;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_row() -> StudentResult {
        StudentResult {
            matricule: "E001".to_string(),
            last_name: "Kouassi".to_string(),
            first_name: "Awa".to_string(),
            average: Some(12.34),
            credits_earned: 24,
            total_credits: 30,
            semester_decision: Some("SV"),
            decision: Some("AUE"),
            mention: Some("Admis avec UE à rattraper"),
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_row());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_row()).unwrap();
    }

    #[test]
    fn test_append_record_creates_file() {
        let path = temp_path("deliberation_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_record(&path, &sample_row()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("deliberation_test_header.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &sample_row()).unwrap();
        append_record(&path, &sample_row()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.contains("matricule")).count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_two_rows() {
        let path = temp_path("deliberation_test_rows.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &sample_row()).unwrap();
        append_record(&path, &sample_row()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 2 data rows
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_report() {
        let path = temp_path("deliberation_test_report.json");
        let _ = fs::remove_file(&path);

        let report = DeliberationReport {
            generated_at: Utc::now(),
            academic_year: "2024-2025".to_string(),
            semester: "S1".to_string(),
            program: "Licence Informatique".to_string(),
            level: "L2".to_string(),
            results: vec![sample_row()],
        };
        write_report(&path, &report).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"academic_year\": \"2024-2025\""));
        assert!(content.contains("E001"));

        fs::remove_file(&path).unwrap();
    }
}

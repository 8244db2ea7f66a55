//! Bulk grade intake from CSV with per-row validation.
//!
//! Rows carry `matricule`, `sub_unit` and an optional `grade` cell. A row
//! failing validation is rejected with its line number and reason; the rest
//! of the batch keeps going. An empty grade cell is a legitimate absence
//! record, not an error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use tracing::{debug, warn};

use crate::session::{GradeRecord, Session};

/// Raw CSV row. The grade cell stays a string so a malformed number is
/// reported as a rejected row instead of aborting deserialization.
#[derive(Debug, Deserialize)]
struct GradeRow {
    #[serde(default)]
    matricule: String,
    #[serde(default)]
    sub_unit: String,
    #[serde(default)]
    grade: Option<String>,
}

/// One rejected CSV row: 1-based line number (header is line 1) and reason.
#[derive(Debug)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

/// Outcome of a bulk import: accepted grade records plus the rejection report.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub accepted: Vec<GradeRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Reads grade rows from a CSV file, validating each against the session.
///
/// Rejection reasons: missing matricule or sub-unit code, unknown matricule
/// or sub-unit, a grade cell that is not a number, or a grade outside
/// [0, 20]. Accepted records are safe to hand to the engine as-is.
pub fn read_grade_rows(path: &str, session: &Session) -> Result<ImportReport> {
    let file = File::open(path).with_context(|| format!("opening grades file {}", path))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut report = ImportReport::default();

    for (i, row) in reader.deserialize::<GradeRow>().enumerate() {
        let line = i as u64 + 2; // data starts after the header line

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                reject(&mut report, line, format!("unreadable row: {}", e));
                continue;
            }
        };

        let matricule = row.matricule.trim();
        let sub_unit = row.sub_unit.trim();

        if matricule.is_empty() {
            reject(&mut report, line, "missing matricule".to_string());
            continue;
        }
        if sub_unit.is_empty() {
            reject(&mut report, line, "missing sub-unit code".to_string());
            continue;
        }
        if !session.students.iter().any(|s| s.matricule == matricule) {
            reject(
                &mut report,
                line,
                format!("unknown matricule {}", matricule),
            );
            continue;
        }
        if !session
            .units
            .iter()
            .flat_map(|u| &u.sub_units)
            .any(|su| su.code == sub_unit)
        {
            reject(
                &mut report,
                line,
                format!("unknown sub-unit code {}", sub_unit),
            );
            continue;
        }

        let raw = row.grade.as_deref().map(str::trim).unwrap_or("");
        let grade = if raw.is_empty() {
            None
        } else {
            match raw.parse::<f64>() {
                Ok(value) if (0.0..=20.0).contains(&value) => Some(value),
                Ok(value) => {
                    reject(
                        &mut report,
                        line,
                        format!("grade {} outside [0, 20]", value),
                    );
                    continue;
                }
                Err(_) => {
                    reject(&mut report, line, format!("grade '{}' is not a number", raw));
                    continue;
                }
            }
        };

        report.accepted.push(GradeRecord {
            matricule: matricule.to_string(),
            sub_unit: sub_unit.to_string(),
            grade,
        });
    }

    debug!(
        path,
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        "Grades file read"
    );

    Ok(report)
}

fn reject(report: &mut ImportReport, line: u64, reason: String) {
    warn!(line, reason = %reason, "Rejected grade row");
    report.rejected.push(RejectedRow { line, reason });
}

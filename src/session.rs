//! In-memory model of a deliberation session and the per-student pipeline.
//!
//! A session groups the coursework structure (units and their sub-units with
//! credit weights), the enrolled students, and the sparse grade records for
//! one academic year/semester/program/level. Deliberation runs the engine
//! bottom-up for each student: sub-unit grades → UE results → semester
//! result → final decision.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use tracing::debug;

use crate::engine::annual::annual_average;
use crate::engine::decision::classify_final;
use crate::engine::semester::compute_semester_result;
use crate::engine::types::{GradeEntry, UeResult};
use crate::engine::ue::compute_ue_result;

/// A deliberation session loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub academic_year: String,
    pub semester: String,
    pub program: String,
    pub level: String,
    pub units: Vec<TeachingUnit>,
    pub students: Vec<Student>,
    #[serde(default)]
    pub grades: Vec<GradeRecord>,
}

/// A teaching unit (UE): a named group of sub-units sharing a credit pool.
#[derive(Debug, Clone, Deserialize)]
pub struct TeachingUnit {
    pub code: String,
    pub name: String,
    pub sub_units: Vec<SubUnit>,
}

/// An individually graded component (ECUE) of a teaching unit.
#[derive(Debug, Clone, Deserialize)]
pub struct SubUnit {
    pub code: String,
    pub name: String,
    pub credits: u32,
}

/// An enrolled student.
#[derive(Debug, Clone, Deserialize)]
pub struct Student {
    pub matricule: String,
    pub last_name: String,
    pub first_name: String,
}

/// One recorded grade, keyed by (matricule, sub-unit code).
///
/// `grade: None` records an absence — distinct from a grade of 0.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GradeRecord {
    pub matricule: String,
    pub sub_unit: String,
    pub grade: Option<f64>,
}

/// Flattened per-student semester outcome, one CSV row.
#[derive(Debug, Clone, Serialize)]
pub struct StudentResult {
    pub matricule: String,
    pub last_name: String,
    pub first_name: String,
    pub average: Option<f64>,
    pub credits_earned: u32,
    pub total_credits: u32,
    pub semester_decision: Option<&'static str>,
    pub decision: Option<&'static str>,
    pub mention: Option<&'static str>,
}

/// Per-student annual outcome combining two semesters, one CSV row.
#[derive(Debug, Clone, Serialize)]
pub struct AnnualResult {
    pub matricule: String,
    pub last_name: String,
    pub first_name: String,
    pub average_s1: Option<f64>,
    pub average_s2: Option<f64>,
    pub annual_average: Option<f64>,
    pub credits_earned: u32,
    pub total_credits: u32,
    pub decision: Option<&'static str>,
    pub mention: Option<&'static str>,
}

impl Session {
    /// Loads a session from a JSON file and rejects out-of-range grades at
    /// the door; nothing outside [0, 20] ever reaches the engine.
    pub fn load(path: &str) -> Result<Session> {
        let file = File::open(path).with_context(|| format!("opening session file {}", path))?;
        let session: Session = serde_json::from_reader(file)
            .with_context(|| format!("parsing session file {}", path))?;

        for record in &session.grades {
            if let Some(grade) = record.grade {
                if !(0.0..=20.0).contains(&grade) {
                    bail!(
                        "grade {} for student {} in {} is outside [0, 20]",
                        grade,
                        record.matricule,
                        record.sub_unit
                    );
                }
            }
        }

        debug!(
            path,
            units = session.units.len(),
            students = session.students.len(),
            grades = session.grades.len(),
            "Session loaded"
        );

        Ok(session)
    }

    /// Merges additional grade records; later records override earlier ones
    /// for the same (matricule, sub-unit) key.
    pub fn add_grades(&mut self, records: Vec<GradeRecord>) {
        self.grades.extend(records);
    }

    /// Latest recorded grade for a (student, sub-unit) pair, if any.
    pub fn grade_for(&self, matricule: &str, sub_unit: &str) -> Option<f64> {
        self.grades
            .iter()
            .rev()
            .find(|g| g.matricule == matricule && g.sub_unit == sub_unit)
            .and_then(|g| g.grade)
    }

    fn ue_entries(&self, unit: &TeachingUnit, matricule: &str) -> Vec<GradeEntry> {
        unit.sub_units
            .iter()
            .map(|su| GradeEntry {
                grade: self.grade_for(matricule, &su.code),
                credits: su.credits,
            })
            .collect()
    }

    /// Runs the full aggregation pipeline for one student.
    pub fn deliberate_student(&self, student: &Student) -> StudentResult {
        let ue_results: Vec<UeResult> = self
            .units
            .iter()
            .map(|unit| compute_ue_result(&self.ue_entries(unit, &student.matricule)))
            .collect();

        let semester = compute_semester_result(&ue_results);
        let final_decision = classify_final(
            semester.average,
            semester.credits_earned,
            semester.total_credits,
        );

        StudentResult {
            matricule: student.matricule.clone(),
            last_name: student.last_name.clone(),
            first_name: student.first_name.clone(),
            average: semester.average,
            credits_earned: semester.credits_earned,
            total_credits: semester.total_credits,
            semester_decision: semester.decision.map(|d| d.code()),
            decision: final_decision.decision.map(|o| o.code()),
            mention: final_decision.mention,
        }
    }

    /// Deliberates every enrolled student, in enrollment order.
    pub fn deliberate_all(&self) -> Vec<StudentResult> {
        self.students
            .iter()
            .map(|student| self.deliberate_student(student))
            .collect()
    }
}

/// Combines two semester sessions into annual decisions.
///
/// Students are matched by matricule; a student enrolled in only one
/// semester contributes that semester's figures alone, and the annual
/// average passes the single defined semester through unchanged.
pub fn combine_year(s1: &Session, s2: &Session) -> Vec<AnnualResult> {
    let results_s1 = s1.deliberate_all();
    let results_s2 = s2.deliberate_all();

    let by_matricule: HashMap<&str, &StudentResult> = results_s2
        .iter()
        .map(|r| (r.matricule.as_str(), r))
        .collect();
    let in_s1: HashSet<&str> = results_s1.iter().map(|r| r.matricule.as_str()).collect();

    let mut rows = Vec::new();

    for a in &results_s1 {
        let b = by_matricule.get(a.matricule.as_str()).copied();
        rows.push(annual_row(a, Some(a), b));
    }
    for b in &results_s2 {
        if !in_s1.contains(b.matricule.as_str()) {
            rows.push(annual_row(b, None, Some(b)));
        }
    }

    rows
}

fn annual_row(
    identity: &StudentResult,
    s1: Option<&StudentResult>,
    s2: Option<&StudentResult>,
) -> AnnualResult {
    let average_s1 = s1.and_then(|r| r.average);
    let average_s2 = s2.and_then(|r| r.average);
    let annual = annual_average(average_s1, average_s2);

    let credits_earned =
        s1.map_or(0, |r| r.credits_earned) + s2.map_or(0, |r| r.credits_earned);
    let total_credits = s1.map_or(0, |r| r.total_credits) + s2.map_or(0, |r| r.total_credits);

    let final_decision = classify_final(annual, credits_earned, total_credits);

    AnnualResult {
        matricule: identity.matricule.clone(),
        last_name: identity.last_name.clone(),
        first_name: identity.first_name.clone(),
        average_s1,
        average_s2,
        annual_average: annual,
        credits_earned,
        total_credits,
        decision: final_decision.decision.map(|o| o.code()),
        mention: final_decision.mention,
    }
}

//! Value types produced and consumed by the aggregation engine.

use serde::Serialize;

/// One sub-unit's (ECUE) contribution for one student.
///
/// `grade` is `None` when no grade was recorded; this is distinct from a
/// grade of 0 and is excluded from averaging entirely. `credits` is the
/// sub-unit's weight in the unit's credit pool. Grades, when present, are
/// expected to already lie in [0, 20]; intake enforces that.
#[derive(Debug, Clone, Copy)]
pub struct GradeEntry {
    pub grade: Option<f64>,
    pub credits: u32,
}

/// Pass/fail decision for a teaching unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UeDecision {
    Validated,
    NotValidated,
}

impl UeDecision {
    pub fn code(&self) -> &'static str {
        match self {
            UeDecision::Validated => "UV",
            UeDecision::NotValidated => "UNV",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UeDecision::Validated => "Unité Validée",
            UeDecision::NotValidated => "Unité Non Validée",
        }
    }
}

/// Pass/fail decision for a semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SemesterDecision {
    SemesterValidated,
    SemesterNotValidated,
}

impl SemesterDecision {
    pub fn code(&self) -> &'static str {
        match self {
            SemesterDecision::SemesterValidated => "SV",
            SemesterDecision::SemesterNotValidated => "SNV",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SemesterDecision::SemesterValidated => "Semestre Validé",
            SemesterDecision::SemesterNotValidated => "Semestre Non Validé",
        }
    }
}

/// Aggregate result for a single teaching unit.
///
/// `total_credits` sums every sub-unit's weight, graded or not;
/// `credits_earned` is `total_credits` when the unit validates, else 0.
/// `average` is `None` iff no sub-unit carried a recorded grade.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UeResult {
    pub average: Option<f64>,
    pub total_credits: u32,
    pub credits_earned: u32,
    pub decision: Option<UeDecision>,
}

/// Aggregate result for a semester.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SemesterResult {
    pub average: Option<f64>,
    pub credits_earned: u32,
    pub total_credits: u32,
    pub decision: Option<SemesterDecision>,
}

/// Categorical academic outcome, in descending order of honors.
///
/// The first four tiers require full credit completion; `AdmisAvecRattrapage`
/// is a passing average with unit(s) left to retake; `Ajourne` is an outright
/// fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Distinction,
    Satisfaction,
    Passable,
    Reussi,
    AdmisAvecRattrapage,
    Ajourne,
}

impl Outcome {
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Distinction => "D",
            Outcome::Satisfaction => "S",
            Outcome::Passable => "P",
            Outcome::Reussi => "R",
            Outcome::AdmisAvecRattrapage => "AUE",
            Outcome::Ajourne => "A",
        }
    }

    /// Localized mention printed on transcripts.
    pub fn mention(&self) -> &'static str {
        match self {
            Outcome::Distinction => "Distinction",
            Outcome::Satisfaction => "Satisfaction",
            Outcome::Passable => "Passable",
            Outcome::Reussi => "Réussi",
            Outcome::AdmisAvecRattrapage => "Admis avec UE à rattraper",
            Outcome::Ajourne => "Ajourné",
        }
    }
}

/// Final classification of an aggregate average and credit completion.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FinalDecision {
    pub decision: Option<Outcome>,
    pub mention: Option<&'static str>,
}

use crate::engine::types::{SemesterDecision, SemesterResult, UeResult};
use crate::engine::utility::round2;

/// Rolls unit-level results up into a semester result.
///
/// A unit weighs into the semester average with its FULL nominal credit load
/// (`total_credits`) as soon as it has any computed average, whether or not
/// it was itself validated. Earned credits, by contrast, sum the per-unit
/// figures already gated by each unit's own pass/fail.
pub fn compute_semester_result(ue_results: &[UeResult]) -> SemesterResult {
    let total_credits: u32 = ue_results.iter().map(|ue| ue.total_credits).sum();
    let credits_earned: u32 = ue_results.iter().map(|ue| ue.credits_earned).sum();

    let mut weighted_total = 0.0;
    let mut weight_sum = 0u32;

    for ue in ue_results {
        if let Some(average) = ue.average {
            weighted_total += average * ue.total_credits as f64;
            weight_sum += ue.total_credits;
        }
    }

    if weight_sum == 0 {
        return SemesterResult {
            average: None,
            credits_earned: 0,
            total_credits,
            decision: None,
        };
    }

    let average = round2(weighted_total / weight_sum as f64);
    let decision = if average >= 10.0 {
        SemesterDecision::SemesterValidated
    } else {
        SemesterDecision::SemesterNotValidated
    };

    SemesterResult {
        average: Some(average),
        credits_earned,
        total_credits,
        decision: Some(decision),
    }
}

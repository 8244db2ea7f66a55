use crate::engine::types::{GradeEntry, UeDecision, UeResult};
use crate::engine::utility::round2;

/// Computes a teaching unit's credit-weighted average and pass/fail decision
/// from its sub-unit grades.
///
/// Sub-units with no recorded grade are excluded from the average but still
/// count toward `total_credits` — and toward `credits_earned` once the unit
/// validates on its graded subset. Ungraded sub-units never penalize an
/// otherwise-passing unit.
pub fn compute_ue_result(items: &[GradeEntry]) -> UeResult {
    let total_credits: u32 = items.iter().map(|e| e.credits).sum();

    let mut weighted_total = 0.0;
    let mut weight_sum = 0u32;

    for entry in items {
        if let Some(grade) = entry.grade {
            weighted_total += grade * entry.credits as f64;
            weight_sum += entry.credits;
        }
    }

    if weight_sum == 0 {
        return UeResult {
            average: None,
            total_credits,
            credits_earned: 0,
            decision: None,
        };
    }

    let average = round2(weighted_total / weight_sum as f64);
    let decision = if average >= 10.0 {
        UeDecision::Validated
    } else {
        UeDecision::NotValidated
    };
    let credits_earned = if decision == UeDecision::Validated {
        total_credits
    } else {
        0
    };

    UeResult {
        average: Some(average),
        total_credits,
        credits_earned,
        decision: Some(decision),
    }
}

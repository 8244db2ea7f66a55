use crate::engine::types::{FinalDecision, Outcome};

/// Classifies an aggregate average and credit completion into a final
/// academic outcome with its mention.
///
/// Priority cascade, first match wins, boundaries inclusive:
///
/// | Condition                          | Outcome             |
/// |------------------------------------|---------------------|
/// | full credits, average >= 16        | Distinction         |
/// | full credits, average >= 14        | Satisfaction        |
/// | full credits, average >= 12        | Passable            |
/// | full credits, average >= 10        | Reussi              |
/// | average >= 10, credits incomplete  | AdmisAvecRattrapage |
/// | otherwise                          | Ajourne             |
///
/// A passing average with incomplete credits never reaches the honors tiers,
/// however high it is.
pub fn classify_final(
    average: Option<f64>,
    credits_earned: u32,
    total_credits: u32,
) -> FinalDecision {
    let Some(average) = average else {
        return FinalDecision {
            decision: None,
            mention: None,
        };
    };

    let full_credits = credits_earned >= total_credits;

    let outcome = match average {
        a if full_credits && a >= 16.0 => Outcome::Distinction,
        a if full_credits && a >= 14.0 => Outcome::Satisfaction,
        a if full_credits && a >= 12.0 => Outcome::Passable,
        a if full_credits && a >= 10.0 => Outcome::Reussi,
        a if a >= 10.0 => Outcome::AdmisAvecRattrapage,
        _ => Outcome::Ajourne,
    };

    FinalDecision {
        decision: Some(outcome),
        mention: Some(outcome.mention()),
    }
}

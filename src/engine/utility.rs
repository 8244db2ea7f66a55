/// Rounds a value to exactly 2 decimal places, half away from zero.
///
/// Every aggregation stage rounds at its own point of computation and later
/// stages consume the already-rounded value. Re-deriving an aggregate from
/// raw grades can therefore differ in the last decimal from re-aggregating
/// rounded intermediates; that is the documented behavior of the domain
/// rules, not a defect.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

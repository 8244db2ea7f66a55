use crate::engine::utility::round2;

/// Combines two semester averages into an annual average.
///
/// A single defined semester passes through unchanged — no re-rounding.
/// With both defined, the mean is rounded here like every other stage.
pub fn annual_average(s1: Option<f64>, s2: Option<f64>) -> Option<f64> {
    match (s1, s2) {
        (None, None) => None,
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (Some(a), Some(b)) => Some(round2((a + b) / 2.0)),
    }
}

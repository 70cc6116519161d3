//! Small numeric helpers shared by the outlier and verification stages.

/// Linearly interpolated quantile of an ascending-sorted slice.
///
/// Uses the position `q * (n - 1)` convention. The slice must be non-empty
/// and sorted; `q` is clamped to `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

/// First and third quartiles of an ascending-sorted slice.
pub fn quartiles(sorted: &[f64]) -> (f64, f64) {
    (quantile(sorted, 0.25), quantile(sorted, 0.75))
}

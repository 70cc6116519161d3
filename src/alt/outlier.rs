//! Hyper-altered sample detection.
//!
//! Samples carrying an outlier number of total alterations would dominate
//! every per-gene frequency statistic, so they are masked out once per
//! dataset before any gene filtering. The test is purely numeric: it sees
//! only the per-sample count distribution, never gene identities.

use crate::utils::stats::quartiles;

/// Mark outliers in a per-sample alteration-count distribution.
///
/// Tukey's fences on interpolated quartiles: a count is an outlier iff it
/// is strictly above `q3 + 1.5 * iqr` (or, when `high_only` is false, also
/// strictly below `q1 - 1.5 * iqr`). Degenerate distributions (all counts
/// equal) produce an all-false mask.
pub fn mark_outliers(counts: &[u32], high_only: bool) -> Vec<bool> {
    if counts.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let (q1, q3) = quartiles(&sorted);
    let iqr = q3 - q1;
    let upper = q3 + 1.5 * iqr;
    let lower = q1 - 1.5 * iqr;

    counts
        .iter()
        .map(|&c| {
            let v = c as f64;
            v > upper || (!high_only && v < lower)
        })
        .collect()
}

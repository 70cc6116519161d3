//! Gene selection: minimum-frequency filter and ranked size cap.

use anyhow::{bail, Result};
use log::info;
use std::collections::HashMap;

use crate::alt::Cohort;

/// Per-gene altered-sample counts over the unmasked cohort.
pub fn alteration_counts(cohort: &Cohort, mask: &[bool]) -> HashMap<String, usize> {
    cohort
        .iter()
        .map(|(id, gene)| (id.clone(), gene.altered_count(mask)))
        .collect()
}

/// Drop genes altered in less than `min_fraction` of unmasked samples.
///
/// The denominator is the number of unmasked samples, constant across
/// genes. Returns the number of genes dropped; fails when the filter
/// leaves an empty cohort.
pub fn filter_by_frequency(
    cohort: &mut Cohort,
    counts: &HashMap<String, usize>,
    mask: &[bool],
    min_fraction: f64,
) -> Result<usize> {
    let total = mask.iter().filter(|&&h| !h).count();
    if total == 0 {
        bail!("No samples survive the hyper-altered mask");
    }

    let before = cohort.len();
    cohort.retain(|id, _| counts[id] as f64 / total as f64 >= min_fraction);

    if cohort.is_empty() {
        bail!(
            "No genes altered in at least {:.1}% of {} samples",
            min_fraction * 100.0,
            total
        );
    }
    Ok(before - cohort.len())
}

/// Cap the cohort to at most `limit` genes by descending alteration count.
///
/// Ties at the boundary are broken deterministically (count descending, gene
/// id ascending), and the cutoff is inclusive: every gene whose count equals
/// the count at rank `limit` is dropped, so an exact tie group at the
/// boundary is excluded entirely rather than split. The kept size can
/// therefore come out below `limit`; that clean break over ties is
/// intentional. A `limit` of 0 disables the cap entirely rather than
/// dropping everything. Returns the cutoff count when the cap engaged.
pub fn cap_by_rank(
    cohort: &mut Cohort,
    counts: &HashMap<String, usize>,
    limit: usize,
) -> Result<Option<usize>> {
    if cohort.len() <= limit || limit == 0 {
        return Ok(None);
    }
    info!("Genes before limit = {}", cohort.len());

    let mut ranked: Vec<String> = cohort.keys().cloned().collect();
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]).then_with(|| a.cmp(b)));

    let cutoff = counts[&ranked[limit]];
    cohort.retain(|id, _| counts[id] > cutoff);

    if cohort.is_empty() {
        bail!(
            "None of the {} candidate genes exceeds the rank-cutoff count {}",
            ranked.len(),
            cutoff
        );
    }
    Ok(Some(cutoff))
}

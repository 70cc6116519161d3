//! Alteration model: per-gene event channels across an ordered sample cohort.
//!
//! Every gene carries two independent channels (mutation, copy-number) plus a
//! derived "genomic" channel that is the OR of the two. All channel vectors
//! have exactly one entry per cohort sample, in cohort order; that ordering
//! is the join key across genes and must survive to the output matrix.

use anyhow::{bail, Result};
use indexmap::IndexMap;

pub mod encode;
pub mod outlier;
pub mod resolve;
pub mod select;
pub mod verify;

/// Copy-number call for one gene in one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CnCall {
    NoChange,
    /// High-level amplification (gain of function)
    Activating,
    /// Deep deletion (loss of function)
    Inhibiting,
}

/// Per-gene alteration record.
///
/// The cohort map owns these exclusively for the duration of one run;
/// verification and resolution mutate the copy-number channel in place and
/// keep the derived genomic channel in sync.
#[derive(Clone, Debug)]
pub struct GeneAlterations {
    pub id: String,
    pub mutated: Vec<bool>,
    pub copy_number: Vec<CnCall>,
    genomic: Vec<bool>,
}

impl GeneAlterations {
    pub fn new(id: &str, mutated: Vec<bool>, copy_number: Vec<CnCall>) -> Result<Self> {
        if mutated.len() != copy_number.len() {
            bail!(
                "Gene {}: mutation channel has {} samples but copy-number channel has {}",
                id,
                mutated.len(),
                copy_number.len()
            );
        }
        let mut gene = Self {
            id: id.to_string(),
            mutated,
            copy_number,
            genomic: Vec::new(),
        };
        gene.recompute_genomic();
        Ok(gene)
    }

    /// Number of samples in the cohort this record was built for.
    pub fn size(&self) -> usize {
        self.mutated.len()
    }

    /// Derived combined channel: altered iff mutated or copy-number changed.
    pub fn genomic(&self) -> &[bool] {
        &self.genomic
    }

    /// Rebuild the genomic channel from the mutation and copy-number
    /// channels. Must be called after any in-place channel edit.
    pub fn recompute_genomic(&mut self) {
        self.genomic = self
            .mutated
            .iter()
            .zip(&self.copy_number)
            .map(|(&m, &c)| m || c != CnCall::NoChange)
            .collect();
    }

    /// Count samples altered in the genomic channel, skipping masked ones.
    pub fn altered_count(&self, mask: &[bool]) -> usize {
        self.genomic
            .iter()
            .zip(mask)
            .filter(|&(&altered, &hyper)| altered && !hyper)
            .count()
    }
}

/// The cohort: gene id -> record, iterated in ascending-id insertion order.
pub type Cohort = IndexMap<String, GeneAlterations>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genomic_is_or_of_channels() {
        let gene = GeneAlterations::new(
            "G",
            vec![true, false, false, false],
            vec![CnCall::NoChange, CnCall::Activating, CnCall::Inhibiting, CnCall::NoChange],
        )
        .unwrap();
        assert_eq!(gene.genomic(), &[true, true, true, false]);
    }

    #[test]
    fn test_genomic_tracks_channel_edits() {
        let mut gene = GeneAlterations::new(
            "G",
            vec![false, false],
            vec![CnCall::Activating, CnCall::NoChange],
        )
        .unwrap();
        assert_eq!(gene.genomic(), &[true, false]);

        gene.copy_number[0] = CnCall::NoChange;
        gene.recompute_genomic();
        assert_eq!(gene.genomic(), &[false, false]);
    }

    #[test]
    fn test_mismatched_channel_lengths_rejected() {
        let result = GeneAlterations::new("G", vec![false], vec![CnCall::NoChange, CnCall::NoChange]);
        assert!(result.is_err());
    }

    #[test]
    fn test_altered_count_skips_masked() {
        let gene = GeneAlterations::new(
            "G",
            vec![true, true, false, true],
            vec![CnCall::NoChange; 4],
        )
        .unwrap();
        assert_eq!(gene.altered_count(&[false, false, false, false]), 3);
        assert_eq!(gene.altered_count(&[false, true, false, false]), 2);
    }
}

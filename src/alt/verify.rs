//! Expression-based verification of copy-number calls.
//!
//! A copy-number call only survives if the gene's expression in that sample
//! is consistent with the claimed direction: amplified samples should sit
//! high in the expression distribution of copy-neutral samples, deleted
//! samples low. Calls without supporting evidence are demoted to no-change;
//! missing evidence never demotes anything.

use log::debug;

use crate::alt::{CnCall, GeneAlterations};

/// Source of per-gene, per-sample expression measurements.
///
/// Values are in cohort order; `None` entries are missing measurements.
/// Returns `None` when the gene has no expression data at all.
pub trait ExpressionEvidence {
    fn expression(&self, gene: &str) -> Option<&[Option<f64>]>;
}

pub struct CnVerifier<'a, E: ExpressionEvidence> {
    evidence: &'a E,
    significance: f64,
}

impl<'a, E: ExpressionEvidence> CnVerifier<'a, E> {
    pub fn new(evidence: &'a E, significance: f64) -> Self {
        Self { evidence, significance }
    }

    /// Verify a gene's copy-number channel in place.
    ///
    /// Uses an empirical one-sided rank test against the copy-neutral
    /// baseline: for an activating call with expression `x`,
    /// `p = (#{baseline >= x} + 1) / (n + 1)`; inhibiting calls use `<=`.
    /// Returns the number of calls demoted to no-change.
    pub fn verify(&self, gene: &mut GeneAlterations) -> usize {
        let values = match self.evidence.expression(&gene.id) {
            Some(v) => v,
            None => return 0,
        };
        if values.len() != gene.size() {
            debug!(
                "Gene {}: expression vector has {} samples, expected {} - skipping verification",
                gene.id,
                values.len(),
                gene.size()
            );
            return 0;
        }

        // Baseline: measured expression of copy-neutral samples.
        let mut baseline: Vec<f64> = gene
            .copy_number
            .iter()
            .zip(values)
            .filter(|(&c, _)| c == CnCall::NoChange)
            .filter_map(|(_, v)| *v)
            .collect();
        baseline.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = baseline.len();
        // Too few neutral samples to ever reach significance: cannot verify.
        if n == 0 || 1.0 / (n as f64 + 1.0) >= self.significance {
            return 0;
        }

        let mut demoted = 0;
        for i in 0..gene.size() {
            let claimed = gene.copy_number[i];
            if claimed == CnCall::NoChange {
                continue;
            }
            let x = match values[i] {
                Some(v) => v,
                None => continue, // no evidence for this sample, keep the call
            };

            let below = baseline.partition_point(|&b| b < x);
            let at_most = baseline.partition_point(|&b| b <= x);
            let p = match claimed {
                CnCall::Activating => (n - below) as f64 + 1.0,
                CnCall::Inhibiting => at_most as f64 + 1.0,
                CnCall::NoChange => unreachable!(),
            } / (n as f64 + 1.0);

            if p >= self.significance {
                debug!(
                    "Gene {} sample {}: {:?} call unsupported by expression (p = {:.3}), demoting",
                    gene.id, i, claimed, p
                );
                gene.copy_number[i] = CnCall::NoChange;
                demoted += 1;
            }
        }

        if demoted > 0 {
            gene.recompute_genomic();
        }
        demoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEvidence(HashMap<String, Vec<Option<f64>>>);

    impl ExpressionEvidence for MapEvidence {
        fn expression(&self, gene: &str) -> Option<&[Option<f64>]> {
            self.0.get(gene).map(|v| v.as_slice())
        }
    }

    // 22 copy-neutral samples with expression 1..=22, plus flagged samples
    // appended at the end. With n = 22, the minimum one-sided p is
    // 1/23 ~ 0.043 < 0.05, so the test can reach significance.
    fn cohort_gene(calls: &[CnCall], flagged_expr: &[Option<f64>]) -> (GeneAlterations, MapEvidence) {
        let n_base = 22;
        let total = n_base + calls.len();

        let mut cn = vec![CnCall::NoChange; n_base];
        cn.extend_from_slice(calls);
        let mut expr: Vec<Option<f64>> = (1..=n_base).map(|v| Some(v as f64)).collect();
        expr.extend_from_slice(flagged_expr);

        let gene = GeneAlterations::new("G", vec![false; total], cn).unwrap();
        let mut map = HashMap::new();
        map.insert("G".to_string(), expr);
        (gene, MapEvidence(map))
    }

    #[test]
    fn test_supported_amplification_kept() {
        // Expression 100 beats every baseline value: p = 1/23 < 0.05.
        let (mut gene, evidence) = cohort_gene(&[CnCall::Activating], &[Some(100.0)]);
        let demoted = CnVerifier::new(&evidence, 0.05).verify(&mut gene);
        assert_eq!(demoted, 0);
        assert_eq!(*gene.copy_number.last().unwrap(), CnCall::Activating);
    }

    #[test]
    fn test_unsupported_amplification_demoted() {
        // Expression 5.5 sits mid-distribution: not significantly high.
        let (mut gene, evidence) = cohort_gene(&[CnCall::Activating], &[Some(5.5)]);
        let demoted = CnVerifier::new(&evidence, 0.05).verify(&mut gene);
        assert_eq!(demoted, 1);
        assert_eq!(*gene.copy_number.last().unwrap(), CnCall::NoChange);
        assert!(!gene.genomic().last().unwrap());
    }

    #[test]
    fn test_supported_deletion_kept() {
        let (mut gene, evidence) = cohort_gene(&[CnCall::Inhibiting], &[Some(0.1)]);
        let demoted = CnVerifier::new(&evidence, 0.05).verify(&mut gene);
        assert_eq!(demoted, 0);
    }

    #[test]
    fn test_unsupported_deletion_demoted() {
        let (mut gene, evidence) = cohort_gene(&[CnCall::Inhibiting], &[Some(21.0)]);
        let demoted = CnVerifier::new(&evidence, 0.05).verify(&mut gene);
        assert_eq!(demoted, 1);
    }

    #[test]
    fn test_no_expression_row_is_noop() {
        let (mut gene, _) = cohort_gene(&[CnCall::Activating], &[Some(5.5)]);
        let empty = MapEvidence(HashMap::new());
        let demoted = CnVerifier::new(&empty, 0.05).verify(&mut gene);
        assert_eq!(demoted, 0);
        assert_eq!(*gene.copy_number.last().unwrap(), CnCall::Activating);
    }

    #[test]
    fn test_missing_sample_value_preserves_call() {
        let (mut gene, evidence) = cohort_gene(&[CnCall::Activating], &[None]);
        let demoted = CnVerifier::new(&evidence, 0.05).verify(&mut gene);
        assert_eq!(demoted, 0);
        assert_eq!(*gene.copy_number.last().unwrap(), CnCall::Activating);
    }

    #[test]
    fn test_tiny_baseline_cannot_verify() {
        // 3 neutral samples: minimum p is 1/4 = 0.25 >= 0.05, so nothing
        // can be demoted even with unremarkable expression.
        let cn = vec![
            CnCall::NoChange,
            CnCall::NoChange,
            CnCall::NoChange,
            CnCall::Activating,
        ];
        let gene_expr = vec![Some(1.0), Some(2.0), Some(3.0), Some(2.0)];
        let mut gene = GeneAlterations::new("G", vec![false; 4], cn).unwrap();
        let mut map = HashMap::new();
        map.insert("G".to_string(), gene_expr);
        let demoted = CnVerifier::new(&MapEvidence(map), 0.05).verify(&mut gene);
        assert_eq!(demoted, 0);
        assert_eq!(gene.copy_number[3], CnCall::Activating);
    }
}

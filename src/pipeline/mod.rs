//! Pipeline orchestration.
//!
//! Stages run in a fixed order because each cohort-wide stage needs the
//! fully settled output of the per-gene stages before it: verification and
//! resolution touch one gene at a time, then the hyper-altered mask is
//! computed once over the whole post-resolution cohort, then both selection
//! stages consume that mask. Fatal conditions abort before any output file
//! is written.

use anyhow::Result;
use log::info;

use crate::alt::outlier::mark_outliers;
use crate::alt::resolve::resolve_minor_calls;
use crate::alt::select::{alteration_counts, cap_by_rank, filter_by_frequency};
use crate::alt::verify::CnVerifier;
use crate::alt::Cohort;
use crate::config::PipelineConfig;
use crate::input::CohortData;
use crate::output::{write_matrix_file, OutputCollector, RunSummary};

/// Result from PipelineRunner::run().
pub struct PipelineResult {
    pub summary: RunSummary,
    /// Retained genes, post-selection
    pub cohort: Cohort,
    /// Hyper-altered sample mask, cohort order
    pub mask: Vec<bool>,
    /// Sample identifiers, cohort order
    pub samples: Vec<String>,
}

impl PipelineResult {
    /// Write the matrix and summary as `<prefix>.matrix.txt` and
    /// `<prefix>.summary.json`.
    pub fn write_to_prefix(&self, prefix: &str) -> std::io::Result<()> {
        write_matrix_file(
            &format!("{}.matrix.txt", prefix),
            &self.cohort,
            &self.mask,
            &self.samples,
        )?;
        self.summary.write_json(&format!("{}.summary.json", prefix))
    }
}

pub struct PipelineRunner<'a> {
    config: &'a PipelineConfig,
}

impl<'a> PipelineRunner<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(self, data: CohortData) -> Result<PipelineResult> {
        let thresholds = &self.config.thresholds;
        let CohortData { samples, mut genes, expression } = data;

        info!("Samples = {}", samples.len());
        info!("Genes with data = {}", genes.len());
        let genes_with_data = genes.len();

        // Per-gene stages. Gene iteration is in ascending-id order, so the
        // diagnostics below come out deterministic.
        let verifier = CnVerifier::new(&expression, thresholds.expression_significance);
        let mut demoted = 0;
        for gene in genes.values_mut() {
            demoted += verifier.verify(gene);
        }
        info!("Copy-number calls demoted by expression = {}", demoted);

        let mut ambiguous: Vec<String> = Vec::new();
        let mut minor_removed = 0;
        for gene in genes.values_mut() {
            let res = resolve_minor_calls(gene);
            minor_removed += res.removed;
            if res.ambiguous {
                ambiguous.push(gene.id.clone());
            }
        }
        info!("Minor copy-number calls removed = {}", minor_removed);

        // Cohort-wide stages, on the fully settled genomic channels.
        let counts_per_sample: Vec<u32> = (0..samples.len())
            .map(|i| genes.values().filter(|g| g.genomic()[i]).count() as u32)
            .collect();
        let mask = mark_outliers(&counts_per_sample, thresholds.outlier_high_only);
        let hyper = mask.iter().filter(|&&h| h).count();
        info!("Hyper altered size = {}", hyper);

        let counts = alteration_counts(&genes, &mask);
        filter_by_frequency(&mut genes, &counts, &mask, thresholds.min_alteration_fraction)?;
        info!("After filtering out less-altered = {}", genes.len());
        let after_frequency = genes.len();

        let cutoff = cap_by_rank(&mut genes, &counts, thresholds.gene_count_limit)?;
        if let Some(c) = cutoff {
            info!("Cutoff alteration count = {}", c);
        }
        info!("Genes retained = {}", genes.len());

        let summary = OutputCollector::new()
            .with_cohort(samples.len(), genes_with_data)
            .with_verification(demoted)
            .with_resolution(ambiguous, minor_removed)
            .with_mask(hyper, samples.len() - hyper)
            .with_selection(after_frequency, genes.len(), cutoff)
            .build();

        Ok(PipelineResult { summary, cohort: genes, mask, samples })
    }
}

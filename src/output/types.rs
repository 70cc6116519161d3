//! Output data structures for run diagnostics
//!
//! Non-fatal pipeline decisions (demoted calls, ambiguous genes, masked
//! samples, selection cutoffs) are collected here and serialized as JSON
//! next to the matrix, instead of living in ambient counters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-run diagnostics written to `<prefix>.summary.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RunSummary {
    /// Pipeline version
    pub version: String,

    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,

    /// Samples in the input cohort
    pub sample_total: usize,

    /// Samples flagged as hyper-altered and excluded from output
    pub hyper_altered_samples: usize,

    /// Samples surviving the hyper-altered mask
    pub non_hyper_samples: usize,

    /// Genes with both mutation and copy-number data
    pub genes_with_data: usize,

    /// Genes surviving the minimum-frequency filter
    pub genes_after_frequency_filter: usize,

    /// Genes in the final matrix
    pub genes_retained: usize,

    /// Copy-number calls demoted by expression verification
    pub demoted_copy_number_calls: usize,

    /// Minority-direction copy-number calls removed during resolution
    pub minor_calls_removed: usize,

    /// Genes with equal up/down copy-number counts, resolved to neither
    pub ambiguous_genes: Vec<String>,

    /// Inclusive alteration-count cutoff applied by the rank cap, when the
    /// candidate set exceeded the gene limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_cutoff_count: Option<usize>,
}

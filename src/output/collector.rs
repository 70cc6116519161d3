//! Collector for per-run diagnostics
//!
//! The `OutputCollector` provides a builder pattern for gathering each
//! stage's explicit results into a [`RunSummary`].

use std::fs::File;

use super::types::RunSummary;

/// Builder for collecting stage diagnostics into a run summary
pub struct OutputCollector {
    summary: RunSummary,
}

impl OutputCollector {
    /// Create a new collector with version and timestamp
    pub fn new() -> Self {
        Self {
            summary: RunSummary {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: crate::utils::time::utc_now_iso8601(),
                ..Default::default()
            },
        }
    }

    /// Set cohort dimensions from the loaded input
    pub fn with_cohort(mut self, samples: usize, genes_with_data: usize) -> Self {
        self.summary.sample_total = samples;
        self.summary.genes_with_data = genes_with_data;
        self
    }

    /// Set verification results
    pub fn with_verification(mut self, demoted: usize) -> Self {
        self.summary.demoted_copy_number_calls = demoted;
        self
    }

    /// Set minor-call resolution results
    pub fn with_resolution(mut self, ambiguous_genes: Vec<String>, removed: usize) -> Self {
        self.summary.ambiguous_genes = ambiguous_genes;
        self.summary.minor_calls_removed = removed;
        self
    }

    /// Set hyper-altered mask statistics
    pub fn with_mask(mut self, hyper: usize, non_hyper: usize) -> Self {
        self.summary.hyper_altered_samples = hyper;
        self.summary.non_hyper_samples = non_hyper;
        self
    }

    /// Set gene-selection results
    pub fn with_selection(
        mut self,
        after_frequency_filter: usize,
        retained: usize,
        rank_cutoff_count: Option<usize>,
    ) -> Self {
        self.summary.genes_after_frequency_filter = after_frequency_filter;
        self.summary.genes_retained = retained;
        self.summary.rank_cutoff_count = rank_cutoff_count;
        self
    }

    /// Build and return the final summary
    pub fn build(self) -> RunSummary {
        self.summary
    }
}

impl Default for OutputCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSummary {
    /// Write this summary to a JSON file
    pub fn write_json(&self, path: &str) -> std::io::Result<()> {
        if super::schema::should_validate() {
            let value = serde_json::to_value(self).map_err(std::io::Error::other)?;
            if let Err(msg) = super::schema::validate(&value) {
                log::warn!("Schema validation failed for {}: {}", path, msg);
                if cfg!(debug_assertions) {
                    return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, msg));
                }
            }
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self).map_err(std::io::Error::other)
    }
}

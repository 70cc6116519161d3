//! Configuration for the alteration-matrix pipeline.
//!
//! All thresholds live in a single JSON file; every field is optional and
//! falls back to the documented default.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};

/// Top-level pipeline configuration (thresholds, gene selection)
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PipelineConfig {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub genes: GeneConfig,
}

/// Filtering and verification thresholds
#[derive(Deserialize, Debug, Clone)]
pub struct Thresholds {
    /// Significance level for expression-based copy-number verification
    #[serde(default = "default_expression_significance")]
    pub expression_significance: f64,
    /// Minimum fraction of non-hyper samples a gene must be altered in
    #[serde(default = "default_min_alteration_fraction")]
    pub min_alteration_fraction: f64,
    /// Maximum number of genes kept after ranking by alteration count
    /// (0 disables the cap)
    #[serde(default = "default_gene_count_limit")]
    pub gene_count_limit: usize,
    /// Flag only samples with unusually many alterations (never too few)
    #[serde(default = "default_outlier_high_only")]
    pub outlier_high_only: bool,
}

fn default_expression_significance() -> f64 { 0.05 }
fn default_min_alteration_fraction() -> f64 { 0.01 }
fn default_gene_count_limit() -> usize { 500 }
fn default_outlier_high_only() -> bool { true }

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            expression_significance: default_expression_significance(),
            min_alteration_fraction: default_min_alteration_fraction(),
            gene_count_limit: default_gene_count_limit(),
            outlier_high_only: default_outlier_high_only(),
        }
    }
}

/// Gene selection configuration
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GeneConfig {
    /// Restrict the run to these gene symbols (empty = all genes in input)
    #[serde(default)]
    pub include: Vec<String>,
}

impl PipelineConfig {
    /// Load pipeline configuration from a JSON file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> std::io::Result<Self> {
        let config: PipelineConfig = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::from_reader(Cursor::new("{}")).unwrap();
        assert_eq!(config.thresholds.expression_significance, 0.05);
        assert_eq!(config.thresholds.min_alteration_fraction, 0.01);
        assert_eq!(config.thresholds.gene_count_limit, 500);
        assert!(config.thresholds.outlier_high_only);
        assert!(config.genes.include.is_empty());
    }

    #[test]
    fn test_partial_override() {
        let data = r#"{"thresholds": {"gene_count_limit": 100}, "genes": {"include": ["TP53"]}}"#;
        let config = PipelineConfig::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(config.thresholds.gene_count_limit, 100);
        // untouched fields keep their defaults
        assert_eq!(config.thresholds.min_alteration_fraction, 0.01);
        assert_eq!(config.genes.include, vec!["TP53".to_string()]);
    }

    #[test]
    fn test_malformed_json() {
        let result = PipelineConfig::from_reader(Cursor::new("{not json"));
        assert!(result.is_err());
    }
}

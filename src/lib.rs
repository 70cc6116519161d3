//! altmat prepares gene-by-sample alteration matrices for downstream
//! mutual-exclusivity analysis: it cross-checks copy-number calls against
//! expression, resolves mixed-direction copy-number genes, masks
//! hyper-altered samples, and selects a bounded, ranked gene set.

pub mod alt;
pub mod config;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod utils;

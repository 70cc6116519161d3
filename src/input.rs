//! Tab-delimited alteration-profile readers.
//!
//! The data source is three matrix files sharing one header layout:
//! `ID<TAB>sample1<TAB>...<TAB>sampleN`, one gene per row. The copy-number
//! profile carries discrete codes (2 = amplification, -2 = deep deletion,
//! anything else neutral), the mutation profile carries per-sample mutation
//! cells (non-empty, non-zero = mutated), and the optional expression
//! profile carries floating-point values with `NA` for missing.
//!
//! The sample header of the copy-number profile defines the cohort order;
//! every other profile must match it exactly, and every row must have one
//! cell per sample. Violations are data-source contract errors and fail the
//! run immediately.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::alt::verify::ExpressionEvidence;
use crate::alt::{CnCall, Cohort, GeneAlterations};

/// One parsed profile: sample header plus per-gene rows of raw cells.
#[derive(Debug)]
pub struct Profile {
    pub samples: Vec<String>,
    pub rows: IndexMap<String, Vec<String>>,
}

pub fn read_profile(path: &str) -> Result<Profile> {
    let file = File::open(path).with_context(|| format!("Error opening profile {}", path))?;
    read_profile_from_reader(BufReader::new(file)).with_context(|| format!("In profile {}", path))
}

pub fn read_profile_from_reader<R: BufRead>(reader: R) -> Result<Profile> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => bail!("Profile is empty"),
    };
    // first header cell is the gene-id column label, the rest are samples
    let samples: Vec<String> = header.split('\t').skip(1).map(|s| s.to_string()).collect();
    if samples.is_empty() {
        bail!("Profile header names no samples");
    }

    let mut rows: IndexMap<String, Vec<String>> = IndexMap::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let mut cells = line.split('\t');
        let id = cells.next().unwrap_or("").to_string();
        if id.is_empty() {
            bail!("Row {}: empty gene identifier", i + 2);
        }
        let values: Vec<String> = cells.map(|s| s.to_string()).collect();

        if values.len() != samples.len() {
            bail!(
                "Row {} (gene {}): {} value columns for {} samples",
                i + 2,
                id,
                values.len(),
                samples.len()
            );
        }
        if rows.insert(id.clone(), values).is_some() {
            bail!("Duplicate gene identifier {} at row {}", id, i + 2);
        }
    }
    Ok(Profile { rows, samples })
}

fn parse_cn_cell(cell: &str) -> CnCall {
    match cell.trim().parse::<i32>() {
        Ok(v) if v >= 2 => CnCall::Activating,
        Ok(v) if v <= -2 => CnCall::Inhibiting,
        _ => CnCall::NoChange, // low-level changes, NA, or unparseable
    }
}

fn parse_mutation_cell(cell: &str) -> bool {
    let c = cell.trim();
    !(c.is_empty() || c == "0" || c.eq_ignore_ascii_case("na") || c.eq_ignore_ascii_case("nan"))
}

fn parse_expression_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Expression measurements keyed by gene, in cohort sample order.
#[derive(Default)]
pub struct ExpressionData {
    values: HashMap<String, Vec<Option<f64>>>,
}

impl ExpressionData {
    pub fn from_profile(profile: &Profile) -> Self {
        let values = profile
            .rows
            .iter()
            .map(|(id, cells)| {
                let parsed = cells.iter().map(|c| parse_expression_cell(c)).collect();
                (id.clone(), parsed)
            })
            .collect();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ExpressionEvidence for ExpressionData {
    fn expression(&self, gene: &str) -> Option<&[Option<f64>]> {
        self.values.get(gene).map(|v| v.as_slice())
    }
}

/// The assembled input for one pipeline run.
pub struct CohortData {
    /// Sample identifiers in cohort order (the cross-profile join key)
    pub samples: Vec<String>,
    /// Gene records in ascending-id order
    pub genes: Cohort,
    pub expression: ExpressionData,
}

/// Assemble a cohort from parsed profiles.
///
/// A gene enters the cohort only when it has both a copy-number and a
/// mutation row; `include` (when non-empty) further restricts the gene set.
pub fn assemble_cohort(
    cn: Profile,
    mutations: Profile,
    expression: Option<Profile>,
    include: &[String],
) -> Result<CohortData> {
    if mutations.samples != cn.samples {
        bail!(
            "Mutation profile sample header does not match copy-number profile ({} vs {} samples)",
            mutations.samples.len(),
            cn.samples.len()
        );
    }
    if let Some(expr) = &expression {
        if expr.samples != cn.samples {
            bail!(
                "Expression profile sample header does not match copy-number profile ({} vs {} samples)",
                expr.samples.len(),
                cn.samples.len()
            );
        }
    }

    let whitelist: HashSet<&str> = include.iter().map(|s| s.as_str()).collect();

    // ascending ids for deterministic iteration and diagnostics
    let mut ids: Vec<&String> = cn.rows.keys().collect();
    ids.sort();

    let mut genes: Cohort = IndexMap::new();
    let mut single_channel = 0usize;
    for id in ids {
        if !whitelist.is_empty() && !whitelist.contains(id.as_str()) {
            continue;
        }
        let mut_cells = match mutations.rows.get(id) {
            Some(cells) => cells,
            None => {
                single_channel += 1;
                continue;
            }
        };
        let mutated: Vec<bool> = mut_cells.iter().map(|c| parse_mutation_cell(c)).collect();
        let copy_number: Vec<CnCall> = cn.rows[id].iter().map(|c| parse_cn_cell(c)).collect();
        let gene = GeneAlterations::new(id, mutated, copy_number)?;
        genes.insert(id.clone(), gene);
    }
    if single_channel > 0 {
        debug!("{} genes lack a mutation row and were skipped", single_channel);
    }

    if genes.is_empty() {
        bail!("No genes with both mutation and copy-number data");
    }

    let expression = expression
        .as_ref()
        .map(ExpressionData::from_profile)
        .unwrap_or_default();

    Ok(CohortData { samples: cn.samples, genes, expression })
}

/// Load and assemble the cohort from profile files.
pub fn load_cohort(
    cn_path: &str,
    mut_path: &str,
    expr_path: Option<&str>,
    include: &[String],
) -> Result<CohortData> {
    let cn = read_profile(cn_path)?;
    info!("Copy-number profile: {} genes, {} samples", cn.rows.len(), cn.samples.len());
    let mutations = read_profile(mut_path)?;
    info!("Mutation profile: {} genes", mutations.rows.len());

    let expression = match expr_path {
        Some(path) => {
            let profile = read_profile(path)?;
            info!("Expression profile: {} genes", profile.rows.len());
            Some(profile)
        }
        None => {
            info!("No expression profile given, copy-number verification will be skipped");
            None
        }
    };

    assemble_cohort(cn, mutations, expression, include)
}

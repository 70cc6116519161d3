//! Resolution of mixed-direction copy-number genes.
//!
//! Downstream statistics assume each gene has a single gain-or-loss
//! direction. When a gene carries both amplifications and deletions across
//! the cohort, only the majority direction is kept; an exact tie clears both
//! directions rather than picking one arbitrarily.

use log::warn;

use crate::alt::{CnCall, GeneAlterations};

/// Outcome of minor-call resolution for one gene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Equal up/down counts: both directions were cleared
    pub ambiguous: bool,
    /// Copy-number calls demoted to no-change
    pub removed: usize,
}

/// Resolve a gene's copy-number channel in place.
///
/// This is a per-gene global decision: after it runs, the channel holds at
/// most one direction of call across the whole cohort.
pub fn resolve_minor_calls(gene: &mut GeneAlterations) -> Resolution {
    let up = gene.copy_number.iter().filter(|&&c| c == CnCall::Activating).count();
    let dw = gene.copy_number.iter().filter(|&&c| c == CnCall::Inhibiting).count();

    if up == 0 || dw == 0 {
        return Resolution::default();
    }

    let keep = if up == dw {
        warn!(
            "Gene {} is equally altered (up: {}, dw: {}), choosing none",
            gene.id, up, dw
        );
        None
    } else if up > dw {
        Some(CnCall::Activating)
    } else {
        Some(CnCall::Inhibiting)
    };

    let mut removed = 0;
    for call in gene.copy_number.iter_mut() {
        if *call != CnCall::NoChange && Some(*call) != keep {
            *call = CnCall::NoChange;
            removed += 1;
        }
    }
    gene.recompute_genomic();

    Resolution { ambiguous: keep.is_none(), removed }
}

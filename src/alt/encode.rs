//! Compact integer encoding of combined channel states.
//!
//! Downstream consumers decode alteration type and direction from these six
//! values, so the table is part of the output contract:
//!
//! | mutation | copy-number | code |
//! |----------|-------------|------|
//! | no       | none        | 0    |
//! | yes      | none        | 1    |
//! | no       | activating  | 2    |
//! | no       | inhibiting  | 3    |
//! | yes      | activating  | 4    |
//! | yes      | inhibiting  | 5    |

use crate::alt::{CnCall, GeneAlterations};

/// Encode one (mutation, copy-number) state pair.
pub fn encode(mutated: bool, cn: CnCall) -> u8 {
    match (mutated, cn) {
        (false, CnCall::NoChange) => 0,
        (true, CnCall::NoChange) => 1,
        (false, CnCall::Activating) => 2,
        (false, CnCall::Inhibiting) => 3,
        (true, CnCall::Activating) => 4,
        (true, CnCall::Inhibiting) => 5,
    }
}

/// Inverse of [`encode`]; `None` for values outside 0..=5.
pub fn decode(code: u8) -> Option<(bool, CnCall)> {
    match code {
        0 => Some((false, CnCall::NoChange)),
        1 => Some((true, CnCall::NoChange)),
        2 => Some((false, CnCall::Activating)),
        3 => Some((false, CnCall::Inhibiting)),
        4 => Some((true, CnCall::Activating)),
        5 => Some((true, CnCall::Inhibiting)),
        _ => None,
    }
}

/// Alteration codes for a gene over the unmasked samples, in cohort order.
/// Masked samples are excluded from the output entirely, not encoded.
pub fn encode_gene(gene: &GeneAlterations, mask: &[bool]) -> Vec<u8> {
    (0..gene.size())
        .filter(|&i| !mask[i])
        .map(|i| encode(gene.mutated[i], gene.copy_number[i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_table() {
        assert_eq!(encode(false, CnCall::NoChange), 0);
        assert_eq!(encode(true, CnCall::NoChange), 1);
        assert_eq!(encode(false, CnCall::Activating), 2);
        assert_eq!(encode(false, CnCall::Inhibiting), 3);
        assert_eq!(encode(true, CnCall::Activating), 4);
        assert_eq!(encode(true, CnCall::Inhibiting), 5);
    }

    #[test]
    fn test_decode_encode_round_trip() {
        for code in 0..=5u8 {
            let (m, c) = decode(code).unwrap();
            assert_eq!(encode(m, c), code);
        }
        assert_eq!(decode(6), None);
    }

    #[test]
    fn test_encode_gene_skips_masked() {
        let gene = GeneAlterations::new(
            "G",
            vec![true, false, true, false],
            vec![CnCall::NoChange, CnCall::Activating, CnCall::Inhibiting, CnCall::NoChange],
        )
        .unwrap();
        let codes = encode_gene(&gene, &[false, true, false, false]);
        assert_eq!(codes, vec![1, 5, 0]);
    }
}

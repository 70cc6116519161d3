//! Tab-delimited gene-by-sample matrix writing.
//!
//! The contract, which downstream consumers parse by splitting on tabs:
//! header row `ID<TAB>sample...` with hyper-altered columns removed, then
//! one row per retained gene (ascending identifier) carrying codes 0-5 for
//! the same filtered, ordered sample sequence. Rows are newline-joined with
//! no trailing newline.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::alt::encode::encode_gene;
use crate::alt::Cohort;

pub fn write_matrix<W: Write>(
    w: &mut W,
    cohort: &Cohort,
    mask: &[bool],
    samples: &[String],
) -> io::Result<()> {
    write!(w, "ID")?;
    for (i, sample) in samples.iter().enumerate() {
        if !mask[i] {
            write!(w, "\t{}", sample)?;
        }
    }

    // genes in ascending-id order, independent of alteration rank
    let mut ids: Vec<&String> = cohort.keys().collect();
    ids.sort();

    for id in ids {
        write!(w, "\n{}", id)?;
        for code in encode_gene(&cohort[id], mask) {
            write!(w, "\t{}", code)?;
        }
    }
    Ok(())
}

pub fn write_matrix_file(
    path: &str,
    cohort: &Cohort,
    mask: &[bool],
    samples: &[String],
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_matrix(&mut writer, cohort, mask, samples)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alt::{CnCall, GeneAlterations};
    use indexmap::IndexMap;

    #[test]
    fn test_matrix_layout() {
        let mut cohort: Cohort = IndexMap::new();
        // inserted out of id order on purpose; rows must come out sorted
        cohort.insert(
            "TP53".to_string(),
            GeneAlterations::new(
                "TP53",
                vec![true, false, false, true],
                vec![CnCall::Activating, CnCall::Activating, CnCall::NoChange, CnCall::NoChange],
            )
            .unwrap(),
        );
        cohort.insert(
            "EGFR".to_string(),
            GeneAlterations::new(
                "EGFR",
                vec![false, false, false, false],
                vec![CnCall::NoChange, CnCall::NoChange, CnCall::Inhibiting, CnCall::NoChange],
            )
            .unwrap(),
        );

        let samples: Vec<String> =
            ["s1", "s2", "s3", "s4"].iter().map(|s| s.to_string()).collect();
        let mask = vec![false, false, false, false];

        let mut buf = Vec::new();
        write_matrix(&mut buf, &cohort, &mask, &samples).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "ID\ts1\ts2\ts3\ts4\nEGFR\t0\t0\t3\t0\nTP53\t4\t2\t0\t1"
        );
    }

    #[test]
    fn test_masked_columns_excluded() {
        let mut cohort: Cohort = IndexMap::new();
        cohort.insert(
            "A".to_string(),
            GeneAlterations::new(
                "A",
                vec![true, true, false],
                vec![CnCall::NoChange; 3],
            )
            .unwrap(),
        );
        let samples: Vec<String> = ["s1", "s2", "s3"].iter().map(|s| s.to_string()).collect();
        let mask = vec![false, true, false];

        let mut buf = Vec::new();
        write_matrix(&mut buf, &cohort, &mask, &samples).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "ID\ts1\ts3\nA\t1\t0");
    }
}

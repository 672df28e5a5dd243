//! Gene essentiality tables.

use crate::data::{model_gene_id, EssentialityLabelSet};
use crate::dataset::LabelPolicy;
use crate::error::{BenchError, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// Column holding the un-prefixed gene id.
pub const GENE_COLUMN: &str = "bigg_id";
/// Column holding the phenotype (`E` or `NE`).
pub const PHENOTYPE_COLUMN: &str = "phenotype";

/// Load an essentiality table into essential / non-essential sets.
///
/// Gene ids are returned in the model's id space (`G_` prefix applied).
pub fn load_essentiality_table<P: AsRef<Path>>(
    path: P,
    policy: LabelPolicy,
) -> Result<EssentialityLabelSet> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BenchError::MissingTable(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| BenchError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let gene_col = column(GENE_COLUMN)?;
    let phenotype_col = column(PHENOTYPE_COLUMN)?;

    let mut essential = BTreeSet::new();
    let mut non_essential = BTreeSet::new();

    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let line = i + 2;
        let gene = row.get(gene_col).unwrap_or("").trim();
        let phenotype = row.get(phenotype_col).unwrap_or("").trim();

        if gene.is_empty() {
            policy.reject(BenchError::MalformedRow {
                path: path.to_path_buf(),
                row: line,
                reason: "empty gene id".to_string(),
            })?;
            continue;
        }

        match phenotype {
            "E" => {
                essential.insert(model_gene_id(gene));
            }
            "NE" => {
                non_essential.insert(model_gene_id(gene));
            }
            other => {
                policy.reject(BenchError::InvalidLabel {
                    path: path.to_path_buf(),
                    row: line,
                    value: other.to_string(),
                })?;
            }
        }
    }

    let overlap: Vec<String> = essential.intersection(&non_essential).cloned().collect();
    for gene in &overlap {
        policy.reject(BenchError::OverlappingLabels(gene.clone()))?;
        essential.remove(gene);
        non_essential.remove(gene);
    }

    log::debug!(
        "Loaded {} essential and {} non-essential genes from {}",
        essential.len(),
        non_essential.len(),
        path.display()
    );
    EssentialityLabelSet::new(essential, non_essential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bigg_id\tphenotype").unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_applies_prefix() {
        let file = table(&["b0001\tE", "b0002\tNE", "b0003\tNE"]);
        let labels = load_essentiality_table(file.path(), LabelPolicy::Strict).unwrap();

        assert_eq!(labels.essential().iter().collect::<Vec<_>>(), vec!["G_b0001"]);
        assert_eq!(labels.non_essential().len(), 2);
        assert!(labels.non_essential().contains("G_b0003"));
    }

    #[test]
    fn test_essential_only_screen() {
        let file = table(&["MG_001\tE", "MG_003\tE"]);
        let labels = load_essentiality_table(file.path(), LabelPolicy::Strict).unwrap();
        assert_eq!(labels.essential().len(), 2);
        assert!(labels.non_essential().is_empty());
    }

    #[test]
    fn test_unknown_phenotype() {
        let file = table(&["b0001\tE", "b0002\tslow"]);
        let strict = load_essentiality_table(file.path(), LabelPolicy::Strict);
        assert!(matches!(strict, Err(BenchError::InvalidLabel { row: 3, .. })));

        let lenient = load_essentiality_table(file.path(), LabelPolicy::Lenient).unwrap();
        assert_eq!(lenient.len(), 1);
    }

    #[test]
    fn test_conflicting_gene() {
        let file = table(&["b0001\tE", "b0001\tNE", "b0002\tNE"]);
        let strict = load_essentiality_table(file.path(), LabelPolicy::Strict);
        assert!(matches!(strict, Err(BenchError::OverlappingLabels(_))));

        let lenient = load_essentiality_table(file.path(), LabelPolicy::Lenient).unwrap();
        assert!(lenient.essential().is_empty());
        assert_eq!(lenient.non_essential().iter().collect::<Vec<_>>(), vec!["G_b0002"]);
    }
}

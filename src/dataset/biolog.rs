//! Biolog growth tables.

use crate::data::{BiologRecord, NutrientCategory};
use crate::dataset::LabelPolicy;
use crate::error::{BenchError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Column holding the candidate compound id.
pub const COMPOUND_COLUMN: &str = "bigg_id";
/// Column holding the experimental growth label.
pub const GROWTH_COLUMN: &str = "growth";

/// Parse an experimental growth label.
///
/// Unknown values return `None`; they are never coerced to no-growth.
pub fn parse_growth(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "+" => Some(true),
        "0" | "false" | "no" | "-" => Some(false),
        _ => None,
    }
}

/// Load the biolog table of one organism for one nutrient category.
///
/// Each compound appears once in the result, in file order. Repeated rows
/// with the same label are collapsed; repeated rows with conflicting labels
/// are malformed.
pub fn load_biolog_table<P: AsRef<Path>>(
    path: P,
    organism: &str,
    category: NutrientCategory,
    policy: LabelPolicy,
) -> Result<Vec<BiologRecord>> {
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
    let compound_col = column(COMPOUND_COLUMN)?;
    let growth_col = column(GROWTH_COLUMN)?;

    let mut records: Vec<BiologRecord> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let line = i + 2;
        let compound = row.get(compound_col).unwrap_or("").trim();
        let raw_growth = row.get(growth_col).unwrap_or("").trim();

        if compound.is_empty() {
            policy.reject(BenchError::MalformedRow {
                path: path.to_path_buf(),
                row: line,
                reason: "empty compound id".to_string(),
            })?;
            continue;
        }

        let growth = match parse_growth(raw_growth) {
            Some(g) => g,
            None => {
                policy.reject(BenchError::InvalidLabel {
                    path: path.to_path_buf(),
                    row: line,
                    value: raw_growth.to_string(),
                })?;
                continue;
            }
        };

        if let Some(&idx) = seen.get(compound) {
            if records[idx].growth != growth {
                policy.reject(BenchError::MalformedRow {
                    path: path.to_path_buf(),
                    row: line,
                    reason: format!("conflicting growth labels for '{}'", compound),
                })?;
            }
            continue;
        }

        seen.insert(compound.to_string(), records.len());
        records.push(BiologRecord {
            organism: organism.to_string(),
            category,
            compound: compound.to_string(),
            growth,
        });
    }

    log::debug!(
        "Loaded {} {} sources for {} from {}",
        records.len(),
        category.element(),
        organism,
        path.display()
    );
    Ok(records)
}

//! Per-condition comparison records and result tables.

use crate::data::NutrientCategory;
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Which benchmark a table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assay {
    /// Growth on single nutrient sources.
    Biolog,
    /// Single-gene deletion phenotypes.
    Essentiality,
}

impl Assay {
    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Biolog => "biolog",
            Self::Essentiality => "essentiality",
        }
    }

    fn header(&self) -> &'static [&'static str] {
        match self {
            Self::Biolog => &["org", "source", "met", "value"],
            Self::Essentiality => &["org", "gene", "value"],
        }
    }
}

/// Agreement between a predicted and an observed boolean label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    TruePositive,
    FalsePositive,
    TrueNegative,
    FalseNegative,
}

impl Outcome {
    /// Classify by exact label agreement.
    pub fn classify(predicted: bool, observed: bool) -> Self {
        match (predicted, observed) {
            (true, true) => Self::TruePositive,
            (true, false) => Self::FalsePositive,
            (false, false) => Self::TrueNegative,
            (false, true) => Self::FalseNegative,
        }
    }

    /// Two-letter code written to result tables.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TruePositive => "TP",
            Self::FalsePositive => "FP",
            Self::TrueNegative => "TN",
            Self::FalseNegative => "FN",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "TP" => Some(Self::TruePositive),
            "FP" => Some(Self::FalsePositive),
            "TN" => Some(Self::TrueNegative),
            "FN" => Some(Self::FalseNegative),
            _ => None,
        }
    }

    /// Whether the prediction matched the observation.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::TruePositive | Self::TrueNegative)
    }

    /// The (predicted, observed) pair this outcome encodes.
    pub fn labels(&self) -> (bool, bool) {
        match self {
            Self::TruePositive => (true, true),
            Self::FalsePositive => (true, false),
            Self::TrueNegative => (false, false),
            Self::FalseNegative => (false, true),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Prediction for one condition paired with its experimental label.
///
/// For biolog records the condition is a compound and `category` is set;
/// for essentiality records it is a gene id and `predicted`/`observed` mean
/// "essential".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub organism: String,
    pub category: Option<NutrientCategory>,
    pub condition: String,
    pub predicted: bool,
    pub observed: bool,
}

impl ComparisonRecord {
    /// Record for a biolog compound.
    pub fn biolog(
        organism: &str,
        category: NutrientCategory,
        compound: &str,
        predicted: bool,
        observed: bool,
    ) -> Self {
        Self {
            organism: organism.to_string(),
            category: Some(category),
            condition: compound.to_string(),
            predicted,
            observed,
        }
    }

    /// Record for a gene deletion.
    pub fn gene(organism: &str, gene: &str, predicted: bool, observed: bool) -> Self {
        Self {
            organism: organism.to_string(),
            category: None,
            condition: gene.to_string(),
            predicted,
            observed,
        }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::classify(self.predicted, self.observed)
    }
}

/// Run-scoped table of comparison records for one assay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub assay: Assay,
    pub records: Vec<ComparisonRecord>,
}

impl ComparisonTable {
    pub fn new(assay: Assay) -> Self {
        Self {
            assay,
            records: Vec::new(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append records produced for one organism (or category).
    pub fn extend<I: IntoIterator<Item = ComparisonRecord>>(&mut self, records: I) {
        self.records.extend(records);
    }

    /// Iterate over records.
    pub fn iter(&self) -> impl Iterator<Item = &ComparisonRecord> {
        self.records.iter()
    }

    /// Records for a single organism.
    pub fn for_organism<'a>(&'a self, organism: &'a str) -> impl Iterator<Item = &'a ComparisonRecord> {
        self.records.iter().filter(move |r| r.organism == organism)
    }

    /// Write the table as TSV.
    ///
    /// Biolog: `org, source, met, value`; essentiality: `org, gene, value`,
    /// where `value` is the outcome code.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;
        writer.write_record(self.assay.header())?;

        for r in &self.records {
            match self.assay {
                Assay::Biolog => {
                    let source = r.category.map(|c| c.code()).unwrap_or("");
                    writer.write_record([
                        r.organism.as_str(),
                        source,
                        r.condition.as_str(),
                        r.outcome().code(),
                    ])?;
                }
                Assay::Essentiality => {
                    writer.write_record([
                        r.organism.as_str(),
                        r.condition.as_str(),
                        r.outcome().code(),
                    ])?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Read a table previously written by [`ComparisonTable::to_tsv`].
    pub fn from_tsv<P: AsRef<Path>>(path: P, assay: Assay) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BenchError::MissingTable(path.to_path_buf()));
        }
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;
        let headers = reader.headers()?.clone();
        let mut columns = Vec::new();
        for name in assay.header() {
            let idx = headers
                .iter()
                .position(|h| h.trim() == *name)
                .ok_or_else(|| BenchError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })?;
            columns.push(idx);
        }

        let mut table = Self::new(assay);
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let field = |k: usize| record.get(columns[k]).unwrap_or("").trim().to_string();
            let value = field(columns.len() - 1);
            let outcome = Outcome::from_code(&value).ok_or_else(|| BenchError::InvalidLabel {
                path: path.to_path_buf(),
                row: i + 2,
                value: value.clone(),
            })?;
            let (predicted, observed) = outcome.labels();
            let row = match assay {
                Assay::Biolog => {
                    let category = NutrientCategory::parse(&field(1))?;
                    ComparisonRecord::biolog(&field(0), category, &field(2), predicted, observed)
                }
                Assay::Essentiality => {
                    ComparisonRecord::gene(&field(0), &field(1), predicted, observed)
                }
            };
            table.records.push(row);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_outcome_classification() {
        assert_eq!(Outcome::classify(true, true), Outcome::TruePositive);
        assert_eq!(Outcome::classify(true, false), Outcome::FalsePositive);
        assert_eq!(Outcome::classify(false, false), Outcome::TrueNegative);
        assert_eq!(Outcome::classify(false, true), Outcome::FalseNegative);
        assert!(Outcome::TrueNegative.is_pass());
        assert!(!Outcome::FalseNegative.is_pass());
    }

    #[test]
    fn test_biolog_table_tsv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("biolog.tsv");

        let mut table = ComparisonTable::new(Assay::Biolog);
        table.extend(vec![
            ComparisonRecord::biolog("ecol", NutrientCategory::Carbon, "succ", true, true),
            ComparisonRecord::biolog("ecol", NutrientCategory::Nitrogen, "gln__L", false, true),
        ]);
        table.to_tsv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "org\tsource\tmet\tvalue");
        assert_eq!(lines[1], "ecol\tC\tsucc\tTP");
        assert_eq!(lines[2], "ecol\tN\tgln__L\tFN");

        let reread = ComparisonTable::from_tsv(&path, Assay::Biolog).unwrap();
        assert_eq!(reread, table);
    }

    #[test]
    fn test_essentiality_table_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("essentiality.tsv");

        let mut table = ComparisonTable::new(Assay::Essentiality);
        table.extend(vec![ComparisonRecord::gene("bsub", "G_b0001", false, false)]);
        table.to_tsv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "org\tgene\tvalue\nbsub\tG_b0001\tTN\n");
    }

    #[test]
    fn test_unknown_outcome_code_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("essentiality.tsv");
        std::fs::write(&path, "org\tgene\tvalue\necol\tG_x\tpass\n").unwrap();

        let result = ComparisonTable::from_tsv(&path, Assay::Essentiality);
        assert!(matches!(result, Err(BenchError::InvalidLabel { .. })));
    }
}

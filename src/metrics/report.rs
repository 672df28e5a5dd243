//! Score reports and the run summary.

use crate::data::{Assay, ComparisonTable, NutrientCategory};
use crate::error::Result;
use crate::metrics::ConfusionCounts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Counts and MCC for a subset of comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub counts: ConfusionCounts,
    pub mcc: f64,
}

impl From<ConfusionCounts> for Score {
    fn from(counts: ConfusionCounts) -> Self {
        Self {
            counts,
            mcc: counts.mcc(),
        }
    }
}

/// Aggregated result of one assay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssayScore {
    pub assay: Assay,
    pub counts: ConfusionCounts,
    pub mcc: f64,
    pub sensitivity: f64,
    pub specificity: f64,
    pub precision: f64,
    pub accuracy: f64,
    /// Conditions dropped because their prediction failed.
    pub failures: usize,
    pub by_organism: BTreeMap<String, Score>,
    /// Biolog only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_category: BTreeMap<NutrientCategory, Score>,
}

impl AssayScore {
    /// Fold a comparison table into global and per-group scores.
    pub fn from_table(table: &ComparisonTable, failures: usize) -> Self {
        let mut counts = ConfusionCounts::default();
        let mut organisms: BTreeMap<String, ConfusionCounts> = BTreeMap::new();
        let mut categories: BTreeMap<NutrientCategory, ConfusionCounts> = BTreeMap::new();

        for record in table.iter() {
            let outcome = record.outcome();
            counts.add(outcome);
            organisms
                .entry(record.organism.clone())
                .or_default()
                .add(outcome);
            if let Some(category) = record.category {
                categories.entry(category).or_default().add(outcome);
            }
        }

        Self {
            assay: table.assay,
            counts,
            mcc: counts.mcc(),
            sensitivity: counts.sensitivity(),
            specificity: counts.specificity(),
            precision: counts.precision(),
            accuracy: counts.accuracy(),
            failures,
            by_organism: organisms.into_iter().map(|(k, c)| (k, c.into())).collect(),
            by_category: categories.into_iter().map(|(k, c)| (k, c.into())).collect(),
        }
    }
}

impl std::fmt::Display for AssayScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({} comparisons, {} dropped)", self.assay.name(), self.counts.total(), self.failures)?;
        writeln!(f, "  TP: {}, FP: {}, TN: {}, FN: {}",
                 self.counts.true_positives, self.counts.false_positives,
                 self.counts.true_negatives, self.counts.false_negatives)?;
        writeln!(f, "  MCC:         {:.3}", self.mcc)?;
        writeln!(f, "  Sensitivity: {:.1}%", self.sensitivity * 100.0)?;
        writeln!(f, "  Specificity: {:.1}%", self.specificity * 100.0)?;
        writeln!(f, "  Precision:   {:.1}%", self.precision * 100.0)?;
        writeln!(f, "  Accuracy:    {:.1}%", self.accuracy * 100.0)?;
        for (organism, score) in &self.by_organism {
            writeln!(f, "    {}: MCC {:.3} (n={})", organism, score.mcc, score.counts.total())?;
        }
        for (category, score) in &self.by_category {
            writeln!(f, "    {}: MCC {:.3} (n={})", category.element(), score.mcc, score.counts.total())?;
        }
        Ok(())
    }
}

/// Summary of a benchmark run, written as `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub organisms: Vec<String>,
    pub biolog: Option<AssayScore>,
    pub essentiality: Option<AssayScore>,
}

impl RunSummary {
    pub fn new(name: &str, organisms: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            generated_at: Utc::now(),
            organisms,
            biolog: None,
            essentiality: None,
        }
    }

    pub fn to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}

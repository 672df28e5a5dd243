//! Pairing of model predictions with experimental labels.
//!
//! Each condition (a candidate compound or a gene) is predicted exactly once.
//! A failed prediction drops that single comparison; it is recorded in the
//! batch's `failures` and never aborts the remaining conditions.

mod biolog;
mod essentiality;

pub use biolog::compare_biolog;
pub use essentiality::{compare_essentiality, observed_essentiality};

use crate::data::{ComparisonRecord, NutrientCategory};
use serde::{Deserialize, Serialize};

/// A condition whose prediction could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionFailure {
    pub organism: String,
    pub category: Option<NutrientCategory>,
    pub condition: String,
    pub reason: String,
}

/// Comparisons produced for one organism (and category, for biolog).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBatch {
    pub records: Vec<ComparisonRecord>,
    pub failures: Vec<PredictionFailure>,
}

impl ComparisonBatch {
    /// Number of successful comparisons.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append another batch, keeping order.
    pub fn merge(&mut self, other: ComparisonBatch) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
    }
}

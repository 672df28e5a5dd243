//! Experimental ground-truth labels.

use crate::data::NutrientCategory;
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Prefix joining experimental gene ids to the model's gene id space.
pub const GENE_PREFIX: &str = "G_";

/// Apply the model gene prefix to an un-prefixed gene id.
pub fn model_gene_id(bigg_id: &str) -> String {
    if bigg_id.starts_with(GENE_PREFIX) {
        bigg_id.to_string()
    } else {
        format!("{}{}", GENE_PREFIX, bigg_id)
    }
}

/// Observed growth of one organism on one candidate nutrient source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiologRecord {
    pub organism: String,
    pub category: NutrientCategory,
    pub compound: String,
    pub growth: bool,
}

/// Essential and non-essential genes reported by a screen.
///
/// The two sets are disjoint; a gene in neither set is unlabeled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EssentialityLabelSet {
    essential: BTreeSet<String>,
    non_essential: BTreeSet<String>,
}

impl EssentialityLabelSet {
    /// Build a label set, rejecting genes present in both sets.
    pub fn new(essential: BTreeSet<String>, non_essential: BTreeSet<String>) -> Result<Self> {
        if let Some(gene) = essential.intersection(&non_essential).next() {
            return Err(BenchError::OverlappingLabels(gene.clone()));
        }
        Ok(Self {
            essential,
            non_essential,
        })
    }

    pub fn essential(&self) -> &BTreeSet<String> {
        &self.essential
    }

    pub fn non_essential(&self) -> &BTreeSet<String> {
        &self.non_essential
    }

    /// Total number of labeled genes.
    pub fn len(&self) -> usize {
        self.essential.len() + self.non_essential.len()
    }

    pub fn is_empty(&self) -> bool {
        self.essential.is_empty() && self.non_essential.is_empty()
    }
}

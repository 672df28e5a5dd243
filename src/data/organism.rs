//! Benchmark subjects and their experimental setup.

use crate::data::NutrientCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Biolog experiments available for an organism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiologSetup {
    /// Base medium the single-source plates are built on.
    pub medium: String,
    /// Nutrient categories with experimental data.
    pub categories: Vec<NutrientCategory>,
}

/// Gene essentiality screen available for an organism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssentialitySetup {
    /// Medium the screen was run on. `None` simulates on the model's own
    /// default medium.
    pub medium: Option<String>,
}

/// One benchmark subject: identity, genome and available experiments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganismProfile {
    /// Short identifier used in file names and result tables (e.g. `ecol`).
    pub id: String,
    /// Display name (e.g. `Escherichia coli (K-12 MG1655)`).
    pub name: String,
    /// Genome annotation file, relative to the layout's fasta directory.
    pub genome: String,
    /// Biolog data, if any.
    #[serde(default)]
    pub biolog: Option<BiologSetup>,
    /// Essentiality data, if any.
    #[serde(default)]
    pub essentiality: Option<EssentialitySetup>,
}

impl OrganismProfile {
    /// Create a profile with no experiments attached.
    pub fn new(id: &str, name: &str, genome: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            genome: genome.to_string(),
            biolog: None,
            essentiality: None,
        }
    }

    /// Attach biolog experiments.
    pub fn with_biolog(mut self, medium: &str, categories: &[NutrientCategory]) -> Self {
        self.biolog = Some(BiologSetup {
            medium: medium.to_string(),
            categories: categories.to_vec(),
        });
        self
    }

    /// Attach an essentiality screen.
    pub fn with_essentiality(mut self, medium: Option<&str>) -> Self {
        self.essentiality = Some(EssentialitySetup {
            medium: medium.map(String::from),
        });
        self
    }

    /// Media the model must be gap-filled on: the union of the biolog base
    /// medium and the essentiality medium, sorted.
    pub fn gapfill_media(&self) -> Vec<String> {
        let mut media = BTreeSet::new();
        if let Some(biolog) = &self.biolog {
            media.insert(biolog.medium.clone());
        }
        if let Some(EssentialitySetup { medium: Some(m) }) = &self.essentiality {
            media.insert(m.clone());
        }
        media.into_iter().collect()
    }
}

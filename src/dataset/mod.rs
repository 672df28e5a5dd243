//! Loading of experimental ground truth.
//!
//! Tables are read from a [`DataLayout`]; missing files are fatal, malformed
//! rows are handled according to a [`LabelPolicy`].

mod biolog;
mod essentiality;
mod layout;

pub use biolog::{load_biolog_table, parse_growth};
pub use essentiality::load_essentiality_table;
pub use layout::DataLayout;

use crate::data::{BiologRecord, EssentialityLabelSet, NutrientCategory, OrganismProfile};
use crate::error::{BenchError, Result};
use std::collections::BTreeMap;

/// How rows with unparseable or contradictory labels are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPolicy {
    /// Abort loading with the row's error.
    Strict,
    /// Log a warning and skip the row.
    Lenient,
}

impl LabelPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }

    /// Apply the policy to a row-level error.
    pub(crate) fn reject(&self, err: BenchError) -> Result<()> {
        match self {
            Self::Strict => Err(err),
            Self::Lenient => {
                log::warn!("Skipping row: {}", err);
                Ok(())
            }
        }
    }
}

/// Biolog records of one organism, keyed by category.
pub type BiologData = BTreeMap<NutrientCategory, Vec<BiologRecord>>;

/// Loads per-organism experimental tables from a data layout.
#[derive(Debug, Clone)]
pub struct DatasetLoader<'a> {
    layout: &'a DataLayout,
    policy: LabelPolicy,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(layout: &'a DataLayout, policy: LabelPolicy) -> Self {
        Self { layout, policy }
    }

    /// Load every biolog table configured for an organism.
    ///
    /// Returns an empty map for organisms without biolog data.
    pub fn biolog(&self, profile: &OrganismProfile) -> Result<BiologData> {
        let mut data = BiologData::new();
        let Some(setup) = &profile.biolog else {
            return Ok(data);
        };
        for &category in &setup.categories {
            let path = self.layout.biolog_table(&profile.id, category);
            let records = load_biolog_table(&path, &profile.id, category, self.policy)
                .map_err(|e| e.for_category(&profile.id, category))?;
            data.insert(category, records);
        }
        Ok(data)
    }

    /// Load the essentiality screen of an organism, if it has one.
    pub fn essentiality(&self, profile: &OrganismProfile) -> Result<Option<EssentialityLabelSet>> {
        if profile.essentiality.is_none() {
            return Ok(None);
        }
        let path = self.layout.essentiality_table(&profile.id);
        load_essentiality_table(&path, self.policy)
            .map(Some)
            .map_err(|e| e.for_organism(&profile.id))
    }
}

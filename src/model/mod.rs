//! Growth prediction over metabolic models.
//!
//! The benchmark only needs two questions answered by a model: does it grow
//! on a given set of compounds, and does it still grow after a single gene
//! deletion. [`GrowthModel`] is that seam; [`NetworkModel`] is the bundled
//! implementation.

mod gpr;
mod network;

pub use gpr::Gpr;
pub use network::NetworkModel;

use crate::data::{CompoundSet, OrganismProfile};
use crate::dataset::DataLayout;
use crate::error::{BenchError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Prediction capability of one organism's model.
///
/// Implementations must be safe to share across threads; each benchmark
/// worker only reads its own model.
pub trait GrowthModel: Send + Sync {
    /// Model identifier.
    fn id(&self) -> &str;

    /// Gene ids known to the model (`G_`-prefixed).
    fn genes(&self) -> &BTreeSet<String>;

    /// Predict growth with only `medium` available for uptake.
    ///
    /// `None` uses the model's own default medium.
    fn grows(&self, medium: Option<&CompoundSet>) -> Result<bool>;

    /// Predict growth after deleting a single gene.
    fn grows_without(&self, gene: &str, medium: Option<&CompoundSet>) -> Result<bool>;

    /// A gene is predicted essential when its deletion abolishes growth.
    fn is_essential(&self, gene: &str, medium: Option<&CompoundSet>) -> Result<bool> {
        self.grows_without(gene, medium).map(|grows| !grows)
    }
}

/// Loaded models keyed by organism id.
pub type ModelSet = BTreeMap<String, Box<dyn GrowthModel>>;

/// Load the model of every organism from the layout's model directory.
pub fn load_models(layout: &DataLayout, organisms: &[OrganismProfile]) -> Result<ModelSet> {
    let mut models = ModelSet::new();
    for profile in organisms {
        let path = layout.model_path(&profile.id);
        if !path.exists() {
            return Err(BenchError::MissingTable(path).for_organism(&profile.id));
        }
        let model = NetworkModel::read_json(&path).map_err(|e| e.for_organism(&profile.id))?;
        log::info!("Loaded model for {} from {}", profile.name, path.display());
        models.insert(profile.id.clone(), Box::new(model));
    }
    Ok(models)
}

//! Model reconstruction from genome annotations.
//!
//! Reconstruction is delegated to an external program; the pipeline only
//! needs a genome in and a model file out, see [`Reconstructor`].

mod command;

pub use command::{CommandReconstructor, ReconstructionSettings};

use crate::data::OrganismProfile;
use crate::dataset::DataLayout;
use crate::error::{BenchError, Result};
use std::path::PathBuf;

/// Inputs for reconstructing one organism's model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionRequest {
    pub organism: String,
    pub genome: PathBuf,
    pub output: PathBuf,
    /// Media the draft model must be gap-filled to grow on.
    pub gapfill_media: Vec<String>,
    pub media_db: PathBuf,
}

impl ReconstructionRequest {
    /// Build the request for an organism from the data layout.
    pub fn for_organism(layout: &DataLayout, profile: &OrganismProfile) -> Self {
        Self {
            organism: profile.id.clone(),
            genome: layout.genome_path(&profile.genome),
            output: layout.model_path(&profile.id),
            gapfill_media: profile.gapfill_media(),
            media_db: layout.media_db_path(),
        }
    }
}

/// Produces a model file from a genome.
pub trait Reconstructor: Send + Sync {
    /// Reconstruct the model and return the path it was written to.
    fn reconstruct(&self, request: &ReconstructionRequest) -> Result<PathBuf>;
}

/// Rebuild the models of all organisms, in order.
///
/// Any failure aborts the rebuild, naming the organism.
pub fn rebuild_models(
    reconstructor: &dyn Reconstructor,
    layout: &DataLayout,
    organisms: &[OrganismProfile],
) -> Result<Vec<PathBuf>> {
    let mut built = Vec::with_capacity(organisms.len());
    for profile in organisms {
        log::info!("Reconstructing model for {}", profile.name);
        let request = ReconstructionRequest::for_organism(layout, profile);
        if let Some(dir) = request.output.parent() {
            std::fs::create_dir_all(dir).map_err(|e| BenchError::from(e).for_organism(&profile.id))?;
        }
        let path = reconstructor
            .reconstruct(&request)
            .map_err(|e| e.for_organism(&profile.id))?;
        built.push(path);
    }
    Ok(built)
}

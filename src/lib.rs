//! Phenotype benchmarking for genome-scale metabolic models.
//!
//! Models reconstructed from genome annotations are scored against
//! experimental ground truth along two axes: growth on single
//! carbon/nitrogen/phosphorus/sulfur sources ("biolog") and single-gene
//! essentiality. Every prediction is paired with its observed label and the
//! resulting confusion matrix is summarised by the Matthews correlation
//! coefficient.
//!
//! # Overview
//!
//! - **data**: Core data structures (media, organisms, labels, result tables)
//! - **dataset**: Loading experimental tables from a data layout
//! - **perturb**: Background media for single-source experiments
//! - **model**: Growth prediction (`GrowthModel`, COBRA-JSON network model)
//! - **compare**: Pairing predictions with observed labels
//! - **metrics**: Confusion counts, MCC and run summaries
//! - **reconstruct**: Model reconstruction via an external tool
//! - **pipeline**: Configuration and execution of a benchmark run
//!
//! # Example
//!
//! ```no_run
//! use phenobench::prelude::*;
//!
//! let config = BenchmarkConfig::reference("data/benchmark");
//! let benchmark = Benchmark::new(config).unwrap();
//!
//! let models = benchmark.load_models().unwrap();
//! let media = benchmark.load_media().unwrap();
//! let biolog = benchmark.run_biolog(&models, &media).unwrap();
//! println!("Biolog MCC: {:.3}", biolog.mcc());
//! ```

pub mod compare;
pub mod data;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod model;
pub mod perturb;
pub mod pipeline;
pub mod reconstruct;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::compare::{
        compare_biolog, compare_essentiality, observed_essentiality, ComparisonBatch,
        PredictionFailure,
    };
    pub use crate::data::{
        model_gene_id, Assay, BiologRecord, ComparisonRecord, ComparisonTable, CompoundSet,
        EssentialityLabelSet, MediaRegistry, NutrientCategory, OrganismProfile, Outcome,
    };
    pub use crate::dataset::{DataLayout, DatasetLoader, LabelPolicy};
    pub use crate::error::{BenchError, Result};
    pub use crate::metrics::{AssayScore, ConfusionCounts, RunSummary};
    pub use crate::model::{load_models, GrowthModel, ModelSet, NetworkModel};
    pub use crate::perturb::{background_medium, candidate_medium};
    pub use crate::pipeline::{AssayRun, Benchmark, BenchmarkConfig, RunOptions};
    pub use crate::reconstruct::{CommandReconstructor, Reconstructor};
}

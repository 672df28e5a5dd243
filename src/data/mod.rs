//! Data structures for phenotype benchmarking.

mod category;
mod labels;
mod media;
mod organism;
mod result;

pub use category::NutrientCategory;
pub use labels::{model_gene_id, BiologRecord, EssentialityLabelSet, GENE_PREFIX};
pub use media::{CompoundSet, MediaRegistry};
pub use organism::{BiologSetup, EssentialitySetup, OrganismProfile};
pub use result::{Assay, ComparisonRecord, ComparisonTable, Outcome};

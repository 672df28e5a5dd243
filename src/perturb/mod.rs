//! Media perturbations for single-source growth experiments.

mod background;

pub use background::{background_medium, candidate_medium, remove_baseline};

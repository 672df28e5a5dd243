//! Aggregation of comparison records into quality scores.

mod confusion;
mod report;

pub use confusion::ConfusionCounts;
pub use report::{AssayScore, RunSummary, Score};

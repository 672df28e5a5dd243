//! Benchmark configuration and execution.

mod config;
mod runner;

pub use config::BenchmarkConfig;
pub use runner::{
    AssayRun, Benchmark, BenchmarkRun, RunOptions, BIOLOG_RESULTS, ESSENTIALITY_RESULTS,
    SUMMARY_FILE,
};

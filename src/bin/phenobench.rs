//! phenobench - phenotype benchmark CLI
//!
//! Rebuilds the benchmark models, compares their predictions against biolog
//! and gene essentiality data, and reports the MCC of each assay.
//!
//! The data root is taken from `PHENOBENCH_DATA` (default `data/benchmark`);
//! a full YAML configuration can be given with `PHENOBENCH_CONFIG`.

use clap::Parser;
use phenobench::error::Result;
use phenobench::pipeline::{Benchmark, BenchmarkConfig, RunOptions};
use phenobench::reconstruct::CommandReconstructor;

const CONFIG_ENV: &str = "PHENOBENCH_CONFIG";
const DATA_ENV: &str = "PHENOBENCH_DATA";
const DEFAULT_DATA_ROOT: &str = "data/benchmark";

/// Benchmark metabolic model reconstruction using biolog and gene essentiality data
#[derive(Parser)]
#[command(name = "phenobench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Do not rebuild models during this call
    #[arg(long)]
    skip_rebuild: bool,

    /// Skip biolog benchmark
    #[arg(long)]
    skip_biolog: bool,

    /// Skip essentiality benchmark
    #[arg(long)]
    skip_essentiality: bool,
}

fn load_config() -> Result<BenchmarkConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            log::info!("Loading configuration from {:?}", path);
            BenchmarkConfig::from_file(path)
        }
        None => {
            let root = std::env::var_os(DATA_ENV).unwrap_or_else(|| DEFAULT_DATA_ROOT.into());
            Ok(BenchmarkConfig::reference(root))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    let reconstructor = CommandReconstructor::new(config.reconstruction.clone());
    let benchmark = Benchmark::new(config)?;

    let options = RunOptions {
        rebuild: !cli.skip_rebuild,
        biolog: !cli.skip_biolog,
        essentiality: !cli.skip_essentiality,
    };
    let result = benchmark.run(options, &reconstructor)?;

    if let Some(biolog) = &result.biolog {
        if !biolog.failures.is_empty() {
            log::warn!("{} biolog predictions failed", biolog.failures.len());
        }
        println!("Biolog final MCC value: {:.3}", biolog.mcc());
    }
    if let Some(essentiality) = &result.essentiality {
        if !essentiality.failures.is_empty() {
            log::warn!("{} gene deletions failed", essentiality.failures.len());
        }
        println!("Essentiality final MCC value: {:.3}", essentiality.mcc());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

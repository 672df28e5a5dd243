//! Benchmark runner: rebuild, predict, compare and score.

use crate::compare::{compare_biolog, compare_essentiality, ComparisonBatch, PredictionFailure};
use crate::data::{Assay, ComparisonTable, MediaRegistry, OrganismProfile};
use crate::dataset::DatasetLoader;
use crate::error::{BenchError, Result};
use crate::metrics::{AssayScore, RunSummary};
use crate::model::{load_models, GrowthModel, ModelSet};
use crate::perturb::background_medium;
use crate::pipeline::BenchmarkConfig;
use crate::reconstruct::{rebuild_models, Reconstructor};
use rayon::prelude::*;
use std::path::PathBuf;

pub const BIOLOG_RESULTS: &str = "biolog.tsv";
pub const ESSENTIALITY_RESULTS: &str = "essentiality.tsv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Which stages of a run are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub rebuild: bool,
    pub biolog: bool,
    pub essentiality: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            rebuild: true,
            biolog: true,
            essentiality: true,
        }
    }
}

/// Records, dropped conditions and score of one assay.
#[derive(Debug, Clone)]
pub struct AssayRun {
    pub table: ComparisonTable,
    pub failures: Vec<PredictionFailure>,
    pub score: AssayScore,
}

impl AssayRun {
    fn from_batches(assay: Assay, batches: Vec<ComparisonBatch>) -> Self {
        let mut table = ComparisonTable::new(assay);
        let mut failures = Vec::new();
        for batch in batches {
            table.extend(batch.records);
            failures.extend(batch.failures);
        }
        let score = AssayScore::from_table(&table, failures.len());
        Self {
            table,
            failures,
            score,
        }
    }

    pub fn mcc(&self) -> f64 {
        self.score.mcc
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    pub biolog: Option<AssayRun>,
    pub essentiality: Option<AssayRun>,
    pub summary: RunSummary,
}

/// Runs the benchmark described by a [`BenchmarkConfig`].
#[derive(Debug, Clone)]
pub struct Benchmark {
    config: BenchmarkConfig,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Rebuild every organism's model.
    pub fn rebuild(&self, reconstructor: &dyn Reconstructor) -> Result<Vec<PathBuf>> {
        rebuild_models(reconstructor, &self.config.layout, &self.config.organisms)
    }

    /// Load every organism's model from the layout.
    pub fn load_models(&self) -> Result<ModelSet> {
        load_models(&self.config.layout, &self.config.organisms)
    }

    pub fn load_media(&self) -> Result<MediaRegistry> {
        let media = MediaRegistry::from_tsv(self.config.layout.media_db_path())?;
        log::info!("Loaded {} media", media.len());
        Ok(media)
    }

    /// Compare single-source growth for every organism with biolog data.
    pub fn run_biolog(&self, models: &ModelSet, media: &MediaRegistry) -> Result<AssayRun> {
        let loader = DatasetLoader::new(&self.config.layout, self.config.label_policy());
        let batches = self.per_organism(|profile| {
            if profile.biolog.is_none() {
                return Ok(ComparisonBatch::default());
            }
            biolog_for(profile, &loader, model_for(models, &profile.id)?, media)
        })?;
        Ok(AssayRun::from_batches(Assay::Biolog, batches))
    }

    /// Compare gene essentiality for every organism with a screen.
    pub fn run_essentiality(&self, models: &ModelSet, media: &MediaRegistry) -> Result<AssayRun> {
        let loader = DatasetLoader::new(&self.config.layout, self.config.label_policy());
        let batches = self.per_organism(|profile| {
            if profile.essentiality.is_none() {
                return Ok(ComparisonBatch::default());
            }
            essentiality_for(profile, &loader, model_for(models, &profile.id)?, media)
        })?;
        Ok(AssayRun::from_batches(Assay::Essentiality, batches))
    }

    /// Run the selected stages, writing result tables and the summary to
    /// the layout's results directory.
    pub fn run(
        &self,
        options: RunOptions,
        reconstructor: &dyn Reconstructor,
    ) -> Result<BenchmarkRun> {
        if options.rebuild {
            self.rebuild(reconstructor)?;
        }
        let models = self.load_models()?;
        let media = self.load_media()?;

        let results_dir = self.config.layout.results_path("");
        std::fs::create_dir_all(&results_dir)?;

        let mut summary = RunSummary::new(&self.config.name, self.config.organism_ids());

        let biolog = if options.biolog {
            let run = self.run_biolog(&models, &media)?;
            run.table
                .to_tsv(self.config.layout.results_path(BIOLOG_RESULTS))?;
            log::info!("Biolog: {}", run.score.counts);
            summary.biolog = Some(run.score.clone());
            Some(run)
        } else {
            None
        };

        let essentiality = if options.essentiality {
            let run = self.run_essentiality(&models, &media)?;
            run.table
                .to_tsv(self.config.layout.results_path(ESSENTIALITY_RESULTS))?;
            log::info!("Essentiality: {}", run.score.counts);
            summary.essentiality = Some(run.score.clone());
            Some(run)
        } else {
            None
        };

        summary.to_json(self.config.layout.results_path(SUMMARY_FILE))?;

        Ok(BenchmarkRun {
            biolog,
            essentiality,
            summary,
        })
    }

    /// Apply `f` to every organism, in parallel when configured. Results
    /// keep configuration order.
    fn per_organism<F>(&self, f: F) -> Result<Vec<ComparisonBatch>>
    where
        F: Fn(&OrganismProfile) -> Result<ComparisonBatch> + Sync + Send,
    {
        if self.config.parallel {
            self.config.organisms.par_iter().map(f).collect()
        } else {
            self.config.organisms.iter().map(f).collect()
        }
    }
}

fn model_for<'m>(models: &'m ModelSet, organism: &str) -> Result<&'m dyn GrowthModel> {
    models
        .get(organism)
        .map(|m| m.as_ref())
        .ok_or_else(|| BenchError::MissingModel(organism.to_string()))
}

fn biolog_for(
    profile: &OrganismProfile,
    loader: &DatasetLoader<'_>,
    model: &dyn GrowthModel,
    media: &MediaRegistry,
) -> Result<ComparisonBatch> {
    let mut batch = ComparisonBatch::default();
    let Some(setup) = &profile.biolog else {
        return Ok(batch);
    };
    log::info!("Running biolog benchmark for {}", profile.name);

    let data = loader.biolog(profile)?;
    for &category in &setup.categories {
        let background = background_medium(media, &setup.medium, category)
            .map_err(|e| e.for_category(&profile.id, category))?;
        let tested = data.get(&category).map(Vec::as_slice).unwrap_or(&[]);
        batch.merge(compare_biolog(&profile.id, category, &background, tested, model));
    }
    Ok(batch)
}

fn essentiality_for(
    profile: &OrganismProfile,
    loader: &DatasetLoader<'_>,
    model: &dyn GrowthModel,
    media: &MediaRegistry,
) -> Result<ComparisonBatch> {
    let Some(setup) = &profile.essentiality else {
        return Ok(ComparisonBatch::default());
    };
    let Some(labels) = loader.essentiality(profile)? else {
        return Ok(ComparisonBatch::default());
    };
    log::info!("Running essentiality benchmark for {}", profile.name);

    let medium = match &setup.medium {
        Some(name) => Some(media.get(name).map_err(|e| e.for_organism(&profile.id))?),
        None => None,
    };
    Ok(compare_essentiality(&profile.id, &labels, medium, model))
}

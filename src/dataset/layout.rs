//! On-disk layout of a benchmark data directory.

use crate::data::NutrientCategory;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locations of every input and output of a benchmark run.
///
/// All directories are relative to `root` unless given as absolute paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLayout {
    /// Benchmark data root.
    pub root: PathBuf,
    /// Media database TSV.
    #[serde(default = "default_media_db")]
    pub media_db: PathBuf,
    /// Directory holding genome annotations.
    #[serde(default = "default_fasta_dir")]
    pub fasta_dir: PathBuf,
    /// Directory holding reconstructed models.
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
    /// File extension of model files.
    #[serde(default = "default_model_extension")]
    pub model_extension: String,
    /// Directory holding `<org>/biolog_<element>.tsv` tables.
    #[serde(default = "default_biolog_dir")]
    pub biolog_dir: PathBuf,
    /// Directory holding `<org>.tsv` essentiality tables.
    #[serde(default = "default_essentiality_dir")]
    pub essentiality_dir: PathBuf,
    /// Directory result tables are written to.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

fn default_media_db() -> PathBuf {
    PathBuf::from("media_db.tsv")
}

fn default_fasta_dir() -> PathBuf {
    PathBuf::from("fasta")
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_model_extension() -> String {
    "json".to_string()
}

fn default_biolog_dir() -> PathBuf {
    PathBuf::from("biolog")
}

fn default_essentiality_dir() -> PathBuf {
    PathBuf::from("essentiality")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

impl DataLayout {
    /// Standard layout under a data root.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            media_db: default_media_db(),
            fasta_dir: default_fasta_dir(),
            models_dir: default_models_dir(),
            model_extension: default_model_extension(),
            biolog_dir: default_biolog_dir(),
            essentiality_dir: default_essentiality_dir(),
            results_dir: default_results_dir(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn media_db_path(&self) -> PathBuf {
        self.resolve(&self.media_db)
    }

    pub fn genome_path(&self, genome: &str) -> PathBuf {
        self.resolve(&self.fasta_dir).join(genome)
    }

    pub fn model_path(&self, organism: &str) -> PathBuf {
        self.resolve(&self.models_dir)
            .join(format!("{}.{}", organism, self.model_extension))
    }

    pub fn biolog_table(&self, organism: &str, category: NutrientCategory) -> PathBuf {
        self.resolve(&self.biolog_dir)
            .join(organism)
            .join(format!("biolog_{}.tsv", category.element()))
    }

    pub fn essentiality_table(&self, organism: &str) -> PathBuf {
        self.resolve(&self.essentiality_dir)
            .join(format!("{}.tsv", organism))
    }

    pub fn results_path(&self, file_name: &str) -> PathBuf {
        self.resolve(&self.results_dir).join(file_name)
    }
}

//! Error types for the phenobench library.

use crate::data::NutrientCategory;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Medium '{0}' not found in media database")]
    MissingMedium(String),

    #[error("Required table not found: {}", .0.display())]
    MissingTable(PathBuf),

    #[error("Missing column '{column}' in {}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Malformed row {row} in {}: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("Invalid label '{value}' at row {row} in {}", .path.display())]
    InvalidLabel {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("Gene '{0}' is labeled both essential and non-essential")]
    OverlappingLabels(String),

    #[error("Unknown nutrient category '{0}'")]
    UnknownCategory(String),

    #[error("No model loaded for organism '{0}'")]
    MissingModel(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Reconstruction failed: {0}")]
    Reconstruction(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Organism '{organism}': {source}")]
    InOrganism {
        organism: String,
        #[source]
        source: Box<BenchError>,
    },

    #[error("Organism '{organism}', {} source: {source}", .category.element())]
    InCategory {
        organism: String,
        category: NutrientCategory,
        #[source]
        source: Box<BenchError>,
    },
}

impl BenchError {
    /// Attach the organism this error occurred for.
    pub fn for_organism(self, organism: &str) -> Self {
        BenchError::InOrganism {
            organism: organism.to_string(),
            source: Box::new(self),
        }
    }

    /// Attach the organism and nutrient category this error occurred for.
    pub fn for_category(self, organism: &str, category: NutrientCategory) -> Self {
        BenchError::InCategory {
            organism: organism.to_string(),
            category,
            source: Box::new(self),
        }
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, BenchError>;

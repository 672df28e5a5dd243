//! Named growth media.

use crate::error::{BenchError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// A set of compound identifiers (BiGG ids without compartment suffix).
pub type CompoundSet = BTreeSet<String>;

/// Registry of named media, each a set of compounds.
///
/// Loaded once per benchmark run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MediaRegistry {
    media: BTreeMap<String, CompoundSet>,
}

impl MediaRegistry {
    /// Build a registry from an in-memory mapping.
    pub fn from_media<I, S>(media: I) -> Self
    where
        I: IntoIterator<Item = (S, CompoundSet)>,
        S: Into<String>,
    {
        Self {
            media: media.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Load a media database from a TSV file.
    ///
    /// Expected format: a header row containing `medium` and `compound`
    /// columns, then one row per (medium, compound) pair. Other columns
    /// (descriptions, compound names) are ignored.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BenchError::MissingTable(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;
        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| BenchError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let medium_col = column("medium")?;
        let compound_col = column("compound")?;

        let mut media: BTreeMap<String, CompoundSet> = BTreeMap::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let medium = record.get(medium_col).unwrap_or("").trim();
            let compound = record.get(compound_col).unwrap_or("").trim();
            if medium.is_empty() || compound.is_empty() {
                return Err(BenchError::MalformedRow {
                    path: path.to_path_buf(),
                    row: i + 2,
                    reason: "empty medium or compound".to_string(),
                });
            }
            media
                .entry(medium.to_string())
                .or_default()
                .insert(compound.to_string());
        }

        log::debug!("Loaded {} media from {}", media.len(), path.display());
        Ok(Self { media })
    }

    /// Compounds of a medium, or `MissingMedium` if the name is unknown.
    pub fn get(&self, name: &str) -> Result<&CompoundSet> {
        self.media
            .get(name)
            .ok_or_else(|| BenchError::MissingMedium(name.to_string()))
    }

    /// Check whether a medium is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.media.contains_key(name)
    }

    /// Medium names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.media.keys().map(String::as_str)
    }

    /// Number of media.
    pub fn len(&self) -> usize {
        self.media.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }
}

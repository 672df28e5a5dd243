//! Nutrient-source categories probed by biolog plates.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Element whose source is varied in a biolog experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NutrientCategory {
    /// Alternative carbon sources.
    #[serde(rename = "C")]
    Carbon,
    /// Alternative nitrogen sources.
    #[serde(rename = "N")]
    Nitrogen,
    /// Alternative phosphorus sources.
    #[serde(rename = "P")]
    Phosphorus,
    /// Alternative sulfur sources.
    #[serde(rename = "S")]
    Sulfur,
}

impl NutrientCategory {
    /// All categories in plate order.
    pub fn all() -> [Self; 4] {
        [Self::Carbon, Self::Nitrogen, Self::Phosphorus, Self::Sulfur]
    }

    /// Single-letter code used in result tables.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Carbon => "C",
            Self::Nitrogen => "N",
            Self::Phosphorus => "P",
            Self::Sulfur => "S",
        }
    }

    /// Element name, as used in biolog table file names.
    pub fn element(&self) -> &'static str {
        match self {
            Self::Carbon => "carbon",
            Self::Nitrogen => "nitrogen",
            Self::Phosphorus => "phosphorus",
            Self::Sulfur => "sulfur",
        }
    }

    /// Default sources of this element, removed from the base medium so that
    /// growth depends on the candidate compound alone.
    pub fn baseline_compounds(&self) -> BTreeSet<&'static str> {
        let ids: &[&'static str] = match self {
            Self::Carbon => &["glc__D", "lac__D", "lac__L"],
            Self::Nitrogen => &["nh4"],
            Self::Phosphorus => &["pi"],
            Self::Sulfur => &["so4"],
        };
        ids.iter().copied().collect()
    }

    /// Parse from a code (`C`) or element name (`carbon`).
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "c" | "carbon" => Ok(Self::Carbon),
            "n" | "nitrogen" => Ok(Self::Nitrogen),
            "p" | "phosphorus" => Ok(Self::Phosphorus),
            "s" | "sulfur" | "sulphur" => Ok(Self::Sulfur),
            _ => Err(BenchError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for NutrientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

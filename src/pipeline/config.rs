//! Benchmark configuration.

use crate::data::{NutrientCategory, OrganismProfile};
use crate::dataset::{DataLayout, LabelPolicy};
use crate::error::{BenchError, Result};
use crate::reconstruct::ReconstructionSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn default_true() -> bool {
    true
}

/// Everything a benchmark run needs: where data lives, which organisms are
/// evaluated and how models are rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Name of the run, recorded in the summary.
    pub name: String,
    pub layout: DataLayout,
    /// Organisms in evaluation and output order.
    pub organisms: Vec<OrganismProfile>,
    #[serde(default)]
    pub reconstruction: ReconstructionSettings,
    /// Evaluate organisms on the rayon thread pool.
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Abort on malformed experimental rows instead of skipping them.
    #[serde(default = "default_true")]
    pub strict_labels: bool,
}

impl BenchmarkConfig {
    /// The standard six-organism benchmark rooted at `root`.
    pub fn reference<P: AsRef<Path>>(root: P) -> Self {
        use NutrientCategory::*;

        let organisms = vec![
            OrganismProfile::new("bsub", "Bacillus subtilis (168)", "Bsubtilis_168.faa")
                .with_biolog("M9", &[Carbon, Nitrogen, Phosphorus, Sulfur])
                .with_essentiality(Some("LB")),
            OrganismProfile::new("ecol", "Escherichia coli (K-12 MG1655)", "Ecoli_K12_MG1655.faa")
                .with_biolog("M9", &[Carbon, Nitrogen, Phosphorus, Sulfur])
                .with_essentiality(Some("M9")),
            OrganismProfile::new("mgen", "Mycoplasma genitalium (G-37)", "M_genitalium_G37.faa")
                .with_essentiality(None),
            OrganismProfile::new("paer", "Pseudomonas aeruginosa (PA01)", "Paeruginosa_PAO1.faa")
                .with_biolog("M9", &[Carbon])
                .with_essentiality(Some("M9[succ]")),
            OrganismProfile::new(
                "rsol",
                "Ralstonia solenacearum (GMI1000)",
                "Rsolanacearum_GMI1000.faa",
            )
            .with_biolog("M9", &[Carbon, Nitrogen, Phosphorus, Sulfur]),
            OrganismProfile::new("sone", "Shewanella oneidensis (MR-1)", "Soneidensis_MR1.faa")
                .with_biolog("ShewMM", &[Carbon, Nitrogen])
                .with_essentiality(Some("LB")),
        ];

        Self {
            name: "reference".to_string(),
            layout: DataLayout::new(root),
            organisms,
            reconstruction: ReconstructionSettings::default(),
            parallel: true,
            strict_labels: true,
        }
    }

    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(BenchError::from)
    }

    /// Load and validate a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BenchError::MissingTable(path.to_path_buf()));
        }
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Check organism ids are unique and every biolog setup has categories.
    pub fn validate(&self) -> Result<()> {
        if self.organisms.is_empty() {
            return Err(BenchError::Config("no organisms configured".into()));
        }
        let mut ids = HashSet::new();
        for profile in &self.organisms {
            if profile.id.trim().is_empty() {
                return Err(BenchError::Config("organism with empty id".into()));
            }
            if !ids.insert(profile.id.as_str()) {
                return Err(BenchError::Config(format!(
                    "duplicate organism id '{}'",
                    profile.id
                )));
            }
            if let Some(biolog) = &profile.biolog {
                if biolog.categories.is_empty() {
                    return Err(BenchError::Config(format!(
                        "organism '{}' has biolog data but no categories",
                        profile.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn label_policy(&self) -> LabelPolicy {
        LabelPolicy::from_strict(self.strict_labels)
    }

    /// Organism ids in configuration order.
    pub fn organism_ids(&self) -> Vec<String> {
        self.organisms.iter().map(|p| p.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table() {
        let config = BenchmarkConfig::reference("data/benchmark");
        config.validate().unwrap();

        assert_eq!(config.organism_ids(), vec!["bsub", "ecol", "mgen", "paer", "rsol", "sone"]);

        let mgen = &config.organisms[2];
        assert!(mgen.biolog.is_none());
        assert_eq!(mgen.essentiality.as_ref().unwrap().medium, None);

        let rsol = &config.organisms[4];
        assert!(rsol.essentiality.is_none());
        assert_eq!(rsol.biolog.as_ref().unwrap().categories.len(), 4);

        let sone = &config.organisms[5];
        assert_eq!(sone.biolog.as_ref().unwrap().medium, "ShewMM");
        assert_eq!(sone.gapfill_media(), vec!["LB", "ShewMM"]);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = BenchmarkConfig::reference("/data/benchmark");
        let yaml = config.to_yaml().unwrap();
        let parsed = BenchmarkConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_minimal_yaml_defaults() {
        let yaml = r#"
name: small
layout:
  root: /tmp/bench
organisms:
  - id: ecol
    name: Escherichia coli
    genome: ecoli.faa
    biolog:
      medium: M9
      categories: [C, N]
"#;
        let config = BenchmarkConfig::from_yaml(yaml).unwrap();
        assert!(config.parallel);
        assert!(config.strict_labels);
        assert_eq!(config.reconstruction.program, "carve");
        assert_eq!(config.layout.models_dir, Path::new("models"));
        assert!(config.organisms[0].essentiality.is_none());
        assert_eq!(
            config.organisms[0].biolog.as_ref().unwrap().categories,
            vec![NutrientCategory::Carbon, NutrientCategory::Nitrogen]
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut config = BenchmarkConfig::reference("data");
        config.organisms.push(config.organisms[0].clone());
        assert!(matches!(config.validate(), Err(BenchError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_categories() {
        let mut config = BenchmarkConfig::reference("data");
        config.organisms[1] = config.organisms[1].clone().with_biolog("M9", &[]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ecol"));
    }
}

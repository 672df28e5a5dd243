//! Single-gene deletion comparisons.

use crate::compare::{ComparisonBatch, PredictionFailure};
use crate::data::{ComparisonRecord, CompoundSet, EssentialityLabelSet};
use crate::model::GrowthModel;
use std::collections::{BTreeMap, BTreeSet};

/// Observed essentiality for every comparable model gene (`true` = essential).
///
/// Genes absent from the model are never labeled. When the screen lists
/// non-essential genes, only those listed are labeled non-essential and
/// unmentioned genes are excluded. When it lists none, every model gene not
/// known to be essential is labeled non-essential.
pub fn observed_essentiality(
    labels: &EssentialityLabelSet,
    model_genes: &BTreeSet<String>,
) -> BTreeMap<String, bool> {
    let mut observed = BTreeMap::new();
    for gene in labels.essential().intersection(model_genes) {
        observed.insert(gene.clone(), true);
    }

    if labels.non_essential().is_empty() {
        for gene in model_genes.difference(labels.essential()) {
            observed.insert(gene.clone(), false);
        }
    } else {
        for gene in labels.non_essential().intersection(model_genes) {
            observed.insert(gene.clone(), false);
        }
    }
    observed
}

/// Compare predicted and observed essentiality for one organism.
///
/// `medium` of `None` simulates each deletion on the model's default medium.
/// Records are ordered by gene id.
pub fn compare_essentiality(
    organism: &str,
    labels: &EssentialityLabelSet,
    medium: Option<&CompoundSet>,
    model: &dyn GrowthModel,
) -> ComparisonBatch {
    let observed = observed_essentiality(labels, model.genes());
    let excluded = labels.essential().difference(model.genes()).count()
        + labels.non_essential().difference(model.genes()).count();
    if excluded > 0 {
        log::debug!(
            "{}: {} labeled genes are not in model {}",
            organism,
            excluded,
            model.id()
        );
    }

    let mut batch = ComparisonBatch::default();
    for (gene, essential) in observed {
        match model.is_essential(&gene, medium) {
            Ok(predicted) => {
                batch
                    .records
                    .push(ComparisonRecord::gene(organism, &gene, predicted, essential));
            }
            Err(e) => {
                log::warn!("Dropping gene '{}' for {}: {}", gene, organism, e);
                batch.failures.push(PredictionFailure {
                    organism: organism.to_string(),
                    category: None,
                    condition: gene,
                    reason: e.to_string(),
                });
            }
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BenchError, Result};

    fn genes(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn labels(essential: &[&str], non_essential: &[&str]) -> EssentialityLabelSet {
        EssentialityLabelSet::new(genes(essential), genes(non_essential)).unwrap()
    }

    /// Deleting any gene in `lethal` stops growth; `broken` cannot be simulated.
    struct KnockoutModel {
        genes: BTreeSet<String>,
        lethal: BTreeSet<String>,
        broken: Option<&'static str>,
    }

    impl GrowthModel for KnockoutModel {
        fn id(&self) -> &str {
            "knockout"
        }

        fn genes(&self) -> &BTreeSet<String> {
            &self.genes
        }

        fn grows(&self, _medium: Option<&CompoundSet>) -> Result<bool> {
            Ok(true)
        }

        fn grows_without(&self, gene: &str, _medium: Option<&CompoundSet>) -> Result<bool> {
            if self.broken == Some(gene) {
                return Err(BenchError::Prediction("infeasible".into()));
            }
            Ok(!self.lethal.contains(gene))
        }
    }

    #[test]
    fn test_fallback_when_non_essential_empty() {
        let observed = observed_essentiality(&labels(&["A"], &[]), &genes(&["A", "B", "C"]));
        let expected: BTreeMap<String, bool> = [("A", true), ("B", false), ("C", false)]
            .into_iter()
            .map(|(g, e)| (g.to_string(), e))
            .collect();
        assert_eq!(observed, expected);
    }

    #[test]
    fn test_explicit_non_essential_excludes_unlabeled() {
        let observed = observed_essentiality(&labels(&["A"], &["B"]), &genes(&["A", "B", "C"]));
        let expected: BTreeMap<String, bool> = [("A", true), ("B", false)]
            .into_iter()
            .map(|(g, e)| (g.to_string(), e))
            .collect();
        assert_eq!(observed, expected);
    }

    #[test]
    fn test_genes_outside_model_excluded() {
        let observed = observed_essentiality(&labels(&["A", "X"], &["B", "Y"]), &genes(&["A", "B"]));
        assert_eq!(observed.len(), 2);
        assert!(!observed.contains_key("X"));
        assert!(!observed.contains_key("Y"));
    }

    #[test]
    fn test_one_record_per_gene() {
        let model = KnockoutModel {
            genes: genes(&["A", "B", "C", "D"]),
            lethal: genes(&["A", "C"]),
            broken: None,
        };
        let labels = labels(&["A", "B"], &[]);

        let batch = compare_essentiality("mgen", &labels, None, &model);

        assert_eq!(batch.len(), 4);
        let conditions: Vec<_> = batch.records.iter().map(|r| r.condition.as_str()).collect();
        assert_eq!(conditions, vec!["A", "B", "C", "D"]);
        assert!(batch.records[0].predicted && batch.records[0].observed);
        assert!(!batch.records[1].predicted && batch.records[1].observed);
        assert!(batch.records[2].predicted && !batch.records[2].observed);
    }

    #[test]
    fn test_failed_deletion_dropped() {
        let model = KnockoutModel {
            genes: genes(&["A", "B", "C"]),
            lethal: genes(&["A"]),
            broken: Some("B"),
        };
        let batch = compare_essentiality("bsub", &labels(&["A"], &["B", "C"]), None, &model);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].condition, "B");
        assert!(batch.failures[0].category.is_none());
    }
}

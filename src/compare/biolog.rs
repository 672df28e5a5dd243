//! Single-source growth comparisons.

use crate::compare::{ComparisonBatch, PredictionFailure};
use crate::data::{BiologRecord, ComparisonRecord, CompoundSet, NutrientCategory};
use crate::model::GrowthModel;
use crate::perturb::candidate_medium;
use std::collections::HashSet;

/// Compare predicted and observed growth for every tested compound of one
/// organism and category.
///
/// Each candidate is simulated on `background ∪ {candidate}`. Records follow
/// the order of `tested`; a compound listed twice is only simulated once.
pub fn compare_biolog(
    organism: &str,
    category: NutrientCategory,
    background: &CompoundSet,
    tested: &[BiologRecord],
    model: &dyn GrowthModel,
) -> ComparisonBatch {
    let mut batch = ComparisonBatch::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for record in tested {
        if !seen.insert(record.compound.as_str()) {
            continue;
        }
        let medium = candidate_medium(background, &record.compound);
        match model.grows(Some(&medium)) {
            Ok(predicted) => {
                log::debug!(
                    "{} {} {}: predicted={} observed={}",
                    organism,
                    category,
                    record.compound,
                    predicted,
                    record.growth
                );
                batch.records.push(ComparisonRecord::biolog(
                    organism,
                    category,
                    &record.compound,
                    predicted,
                    record.growth,
                ));
            }
            Err(e) => {
                log::warn!(
                    "Dropping {} source '{}' for {}: {}",
                    category.element(),
                    record.compound,
                    organism,
                    e
                );
                batch.failures.push(PredictionFailure {
                    organism: organism.to_string(),
                    category: Some(category),
                    condition: record.compound.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    batch
}

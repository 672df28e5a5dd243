//! Background media for single-source addition experiments.

use crate::data::{CompoundSet, MediaRegistry, NutrientCategory};
use crate::error::Result;

/// Remove the category's baseline compounds from a medium.
///
/// Identifiers are compared for exact equality; baseline compounds absent
/// from the medium are ignored. The result may be empty.
pub fn remove_baseline(medium: &CompoundSet, category: NutrientCategory) -> CompoundSet {
    let baseline = category.baseline_compounds();
    medium
        .iter()
        .filter(|c| !baseline.contains(c.as_str()))
        .cloned()
        .collect()
}

/// Compounds held constant while single candidate sources are tested:
/// `media[base] - baseline(category)`.
///
/// # Errors
/// `MissingMedium` if `base` is not in the registry.
pub fn background_medium(
    media: &MediaRegistry,
    base: &str,
    category: NutrientCategory,
) -> Result<CompoundSet> {
    let medium = media.get(base)?;
    let background = remove_baseline(medium, category);
    if background.is_empty() {
        log::warn!(
            "Background medium for {} sources on '{}' is empty",
            category.element(),
            base
        );
    }
    Ok(background)
}

/// Medium for testing one candidate: `background ∪ {candidate}`.
pub fn candidate_medium(background: &CompoundSet, candidate: &str) -> CompoundSet {
    let mut medium = background.clone();
    medium.insert(candidate.to_string());
    medium
}

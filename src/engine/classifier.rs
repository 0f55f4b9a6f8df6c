use crate::engine::errors::ReconcileError;
use crate::models::{Category, Tier};
use crate::types::Monetary;

/// Maps a category and unit cost to its budget tier.
///
/// Costs up to and including the saving ceiling are `saving`, costs from the
/// luxury floor upwards are `luxury`, everything strictly between is `balance`.
/// A category outside the closed set is an error, never a fallback tier.
pub fn classify(category: &str, cost: Monetary) -> Result<Tier, ReconcileError> {
    let Some(parsed) = Category::parse(category) else {
        return Err(ReconcileError::unsupported_category(category));
    };

    let tier = if cost <= parsed.saving_ceiling() {
        Tier::Saving
    } else if cost < parsed.luxury_floor() {
        Tier::Balance
    } else {
        Tier::Luxury
    };

    Ok(tier)
}

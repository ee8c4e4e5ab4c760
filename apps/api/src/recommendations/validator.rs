use thiserror::Error;
use tracing::{info, warn};

use crate::recommendations::models::{Recommendation, RecommendationSet};

/// Number of recommendations every live result is normalised to.
pub const TARGET_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No valid recommendations could be parsed from the API response")]
    NoValidRecommendations,
}

/// Count normalisation for parsed records (completeness is enforced by the parser).
///
/// More than `TARGET_COUNT` are truncated in parse order. Fewer are kept as-is:
/// 1–5 items is a valid result, not a failure. Zero items is a parse failure.
pub fn validate(mut items: Vec<Recommendation>) -> Result<RecommendationSet, ValidationError> {
    if items.is_empty() {
        warn!("No valid recommendations parsed from API response");
        return Err(ValidationError::NoValidRecommendations);
    }

    if items.len() < TARGET_COUNT {
        warn!(
            "Only {} valid recommendations found, expected {}",
            items.len(),
            TARGET_COUNT
        );
    }

    if items.len() > TARGET_COUNT {
        info!(
            "Truncating {} recommendations to {}",
            items.len(),
            TARGET_COUNT
        );
        items.truncate(TARGET_COUNT);
    }

    Ok(RecommendationSet::new(items))
}

//! Planting recommendation service

use std::sync::Arc;

use serde::Deserialize;
use shared::{
    score_with_policy, validate_scoring_input, LookupPolicy, Recommendation, ReferenceTables,
};

use crate::error::AppResult;

/// Scores planting requests against the reference tables
#[derive(Clone)]
pub struct RecommendationService {
    tables: Arc<dyn ReferenceTables>,
    policy: LookupPolicy,
}

/// Input for a planting recommendation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    pub crop_id: String,
    pub soil_id: String,
    pub desired_yield: f64,
}

impl RecommendationService {
    /// Create a new RecommendationService instance
    pub fn new(tables: Arc<dyn ReferenceTables>, policy: LookupPolicy) -> Self {
        Self { tables, policy }
    }

    /// Validate the input and score it
    pub fn recommend(&self, input: &RecommendationInput) -> AppResult<Recommendation> {
        validate_scoring_input(&input.crop_id, &input.soil_id, input.desired_yield)?;

        let recommendation = score_with_policy(
            self.tables.as_ref(),
            input.crop_id.trim(),
            input.soil_id.trim(),
            input.desired_yield,
            self.policy,
        )?;

        tracing::debug!(
            crop_id = %input.crop_id,
            soil_id = %input.soil_id,
            confidence = recommendation.confidence,
            "Scored planting request"
        );
        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use shared::{InputError, LookupError, StaticReferenceTables};

    fn input(crop_id: &str, soil_id: &str, desired_yield: f64) -> RecommendationInput {
        RecommendationInput {
            crop_id: crop_id.to_string(),
            soil_id: soil_id.to_string(),
            desired_yield,
        }
    }

    fn service(policy: LookupPolicy) -> RecommendationService {
        RecommendationService::new(Arc::new(StaticReferenceTables::builtin()), policy)
    }

    #[test]
    fn scores_valid_input() {
        let rec = service(LookupPolicy::Lenient)
            .recommend(&input("wheat", "alluvial", 4.0))
            .unwrap();
        assert_eq!(rec.expected_yield, 3.6);
        assert_eq!(rec.confidence, 81);
    }

    #[test]
    fn rejects_missing_crop() {
        let err = service(LookupPolicy::Lenient)
            .recommend(&input("", "alluvial", 4.0))
            .unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::MissingCrop)));
    }

    #[test]
    fn lenient_policy_defaults_unknown_crop() {
        let rec = service(LookupPolicy::Lenient)
            .recommend(&input("quinoa", "alluvial", 4.0))
            .unwrap();
        assert_eq!(rec.factors.soil_suitability, 0.8);
    }

    #[test]
    fn strict_policy_rejects_unknown_crop() {
        let err = service(LookupPolicy::Strict)
            .recommend(&input("quinoa", "alluvial", 4.0))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Lookup(LookupError::UnknownCrop(ref id)) if id == "quinoa"
        ));
    }
}

//! Planting suitability scorer
//!
//! Combines the reference tables with a crop, a soil type and a desired
//! yield into a [`Recommendation`]. Scoring is a pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::models::{Recommendation, ScoringFactors};
use crate::reference::ReferenceTables;
use crate::types::Month;

/// Soil factor when the soil is in the crop's preference list
pub const PREFERRED_SOIL_FACTOR: f64 = 1.0;
/// Soil factor for any other soil, and for unknown crops
pub const FALLBACK_SOIL_FACTOR: f64 = 0.8;
/// Seasonal factor for a planting window wider than [`WIDE_WINDOW_MONTHS`]
pub const WIDE_WINDOW_FACTOR: f64 = 1.0;
/// Seasonal factor for a narrow planting window
pub const NARROW_WINDOW_FACTOR: f64 = 0.9;
/// Planting windows longer than this many months count as wide
pub const WIDE_WINDOW_MONTHS: usize = 3;

/// How unknown crop and soil ids are treated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LookupPolicy {
    /// Unknown ids fall back to default factors and scoring always succeeds
    #[default]
    Lenient,
    /// Unknown ids are reported as [`LookupError`]
    Strict,
}

/// Compute the scoring factors for a crop/soil pair
pub fn scoring_factors<T>(tables: &T, crop_id: &str, soil_id: &str) -> ScoringFactors
where
    T: ReferenceTables + ?Sized,
{
    let suitable_month_count = tables.suitable_months(crop_id).len();
    let soil_suitability = match tables.crop(crop_id) {
        Some(crop) if crop.prefers_soil(soil_id) => PREFERRED_SOIL_FACTOR,
        _ => FALLBACK_SOIL_FACTOR,
    };
    let seasonal_yield_factor = if suitable_month_count > WIDE_WINDOW_MONTHS {
        WIDE_WINDOW_FACTOR
    } else {
        NARROW_WINDOW_FACTOR
    };

    ScoringFactors {
        soil_suitability,
        seasonal_yield_factor,
        suitable_month_count,
    }
}

/// Suitability score (0-100) for the given factors
pub fn confidence_score(factors: &ScoringFactors) -> u8 {
    let month_share = factors.suitable_month_count as f64 / Month::ALL.len() as f64;
    let raw = factors.soil_suitability * 40.0
        + factors.seasonal_yield_factor * 40.0
        + month_share * 20.0;
    raw.round().clamp(0.0, 100.0) as u8
}

/// Score a planting request. Unknown ids degrade to default factors.
///
/// `desired_yield` must be positive; callers at the request boundary check
/// this with [`crate::validation::validate_scoring_input`].
pub fn score<T>(tables: &T, crop_id: &str, soil_id: &str, desired_yield: f64) -> Recommendation
where
    T: ReferenceTables + ?Sized,
{
    debug_assert!(
        desired_yield > 0.0,
        "desired yield must be positive, got {}",
        desired_yield
    );

    let best_time = tables.suitable_months(crop_id);
    let factors = scoring_factors(tables, crop_id, soil_id);
    let expected_yield = desired_yield * factors.soil_suitability * factors.seasonal_yield_factor;

    let months = best_time
        .iter()
        .map(Month::name)
        .collect::<Vec<&str>>()
        .join(", ");

    let mut recommendations = vec![
        format!("Best planting months: {}", months),
        "Prepare soil 2 weeks before planting".to_string(),
        "Ensure proper irrigation system".to_string(),
        "Monitor soil moisture regularly".to_string(),
    ];
    if let Some(soil) = tables.soil(soil_id) {
        recommendations.extend(
            soil.characteristics
                .iter()
                .map(|characteristic| format!("Utilize {}", characteristic)),
        );
    }

    Recommendation {
        best_time,
        confidence: confidence_score(&factors),
        expected_yield,
        recommendations,
        factors,
    }
}

/// Score a planting request, rejecting unknown ids under [`LookupPolicy::Strict`]
pub fn score_with_policy<T>(
    tables: &T,
    crop_id: &str,
    soil_id: &str,
    desired_yield: f64,
    policy: LookupPolicy,
) -> Result<Recommendation, LookupError>
where
    T: ReferenceTables + ?Sized,
{
    if policy == LookupPolicy::Strict {
        if tables.crop(crop_id).is_none() {
            return Err(LookupError::UnknownCrop(crop_id.to_string()));
        }
        if tables.soil(soil_id).is_none() {
            return Err(LookupError::UnknownSoil(soil_id.to_string()));
        }
    }
    Ok(score(tables, crop_id, soil_id, desired_yield))
}

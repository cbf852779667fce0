//! Planting recommendation models

use serde::{Deserialize, Serialize};

use crate::types::Month;

/// Planting suitability recommendation for a crop/soil/yield request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Months in which the crop can be planted, in calendar order
    pub best_time: Vec<Month>,
    /// Suitability score, 0-100
    pub confidence: u8,
    /// Expected yield in the same unit as the desired yield
    pub expected_yield: f64,
    pub recommendations: Vec<String>,
    pub factors: ScoringFactors,
}

/// Intermediate factors the suitability score is built from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringFactors {
    /// 1.0 when the soil is in the crop's preference list, else 0.8
    pub soil_suitability: f64,
    /// 1.0 for a planting window wider than three months, else 0.9
    pub seasonal_yield_factor: f64,
    pub suitable_month_count: usize,
}

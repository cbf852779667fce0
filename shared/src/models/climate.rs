//! Monthly climate models

use serde::{Deserialize, Serialize};

use crate::types::{Month, Season};

/// Typical climate for one calendar month and the crops suited to it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClimateRecord {
    pub month: Month,
    /// Mean temperature in °C
    pub temperature: f64,
    /// Mean rainfall in mm
    pub rainfall: f64,
    /// Mean relative humidity in percent
    pub humidity: f64,
    /// Ids of crops that can be planted this month
    pub suitable_crops: Vec<String>,
    pub season: Season,
}

impl ClimateRecord {
    /// Whether the given crop can be planted this month
    pub fn is_suitable_for(&self, crop_id: &str) -> bool {
        self.suitable_crops.iter().any(|c| c == crop_id)
    }
}

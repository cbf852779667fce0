//! Crop catalog models

use serde::{Deserialize, Serialize};

use crate::types::Season;

/// A crop in the static catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: String,
    pub name: String,
    pub season: Season,
    pub growth_duration: String,
    pub ideal_temperature: String,
    pub water_requirement: String,
    /// Ids of soil types this crop grows best in
    pub soil_preference: Vec<String>,
}

impl Crop {
    pub fn prefers_soil(&self, soil_id: &str) -> bool {
        self.soil_preference.iter().any(|s| s == soil_id)
    }
}

//! Soil type models

use serde::{Deserialize, Serialize};

/// A soil type in the static catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoilType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub characteristics: Vec<String>,
}

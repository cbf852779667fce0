//! WebAssembly module for the Crop Advisor Platform
//!
//! Provides client-side computation for:
//! - Planting suitability scoring against the built-in reference tables
//! - Best planting months for a crop
//! - Disease display names
//! - Offline input validation

use js_sys::Array;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{display_name_from_id, score, ReferenceTables, StaticReferenceTables};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("crop advisor wasm module loaded"));
}

/// Score a planting request offline and return the recommendation as JSON
#[wasm_bindgen]
pub fn get_recommendation(
    crop_id: &str,
    soil_id: &str,
    desired_yield: f64,
) -> Result<String, JsValue> {
    recommendation_json(crop_id, soil_id, desired_yield).map_err(|e| JsValue::from_str(&e))
}

/// Suitability score (0-100) for a crop on a soil
#[wasm_bindgen]
pub fn suitability_confidence(crop_id: &str, soil_id: &str) -> u8 {
    score(&StaticReferenceTables::builtin(), crop_id, soil_id, 1.0).confidence
}

/// Month names in which the crop can be planted, January first
#[wasm_bindgen]
pub fn planting_months(crop_id: &str) -> Array {
    planting_month_names(crop_id)
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

/// Crop catalog as JSON, for selectors that work offline
#[wasm_bindgen]
pub fn crop_catalog() -> String {
    serde_json::to_string(StaticReferenceTables::builtin().crops()).unwrap_or_default()
}

/// Soil catalog as JSON
#[wasm_bindgen]
pub fn soil_catalog() -> String {
    serde_json::to_string(StaticReferenceTables::builtin().soils()).unwrap_or_default()
}

/// Human-readable name for a disease id, e.g. `rice_blast` -> `Rice Blast`
#[wasm_bindgen]
pub fn disease_display_name(disease_id: &str) -> String {
    display_name_from_id(disease_id)
}

/// Check a desired yield before submitting a form
#[wasm_bindgen]
pub fn is_valid_desired_yield(desired_yield: f64) -> bool {
    validate_desired_yield(desired_yield).is_ok()
}

fn recommendation_json(crop_id: &str, soil_id: &str, desired_yield: f64) -> Result<String, String> {
    validate_scoring_input(crop_id, soil_id, desired_yield).map_err(|e| e.to_string())?;

    let recommendation = score(
        &StaticReferenceTables::builtin(),
        crop_id.trim(),
        soil_id.trim(),
        desired_yield,
    );
    serde_json::to_string(&recommendation)
        .map_err(|e| format!("Could not serialize recommendation: {}", e))
}

fn planting_month_names(crop_id: &str) -> Vec<&'static str> {
    StaticReferenceTables::builtin()
        .suitable_months(crop_id)
        .iter()
        .map(Month::name)
        .collect()
}

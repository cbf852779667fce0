//! HTTP handlers for the static reference tables

use axum::{extract::State, Json};
use shared::{ClimateRecord, Crop, SoilType};

use crate::AppState;

/// List the crop catalog
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<Crop>> {
    Json(state.tables.crops().to_vec())
}

/// List the soil catalog
pub async fn list_soils(State(state): State<AppState>) -> Json<Vec<SoilType>> {
    Json(state.tables.soils().to_vec())
}

/// Monthly climate, January to December
pub async fn list_climate(State(state): State<AppState>) -> Json<Vec<ClimateRecord>> {
    Json(state.tables.climate().to_vec())
}

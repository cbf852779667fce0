//! HTTP handlers for planting recommendations

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use shared::{InputError, Recommendation};

use crate::error::AppResult;
use crate::services::recommendation::RecommendationInput;
use crate::AppState;

/// Score a crop/soil/yield request
pub async fn recommend(
    State(state): State<AppState>,
    input: Result<Json<RecommendationInput>, JsonRejection>,
) -> AppResult<Json<Recommendation>> {
    let Json(input) =
        input.map_err(|rejection| InputError::MalformedUpload(rejection.body_text()))?;
    let recommendation = state.recommendations.recommend(&input)?;
    Ok(Json(recommendation))
}

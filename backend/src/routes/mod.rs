//! Route definitions for the Crop Advisor server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Leaf disease classification
        .route("/classify", post(handlers::classify))
        // Planting recommendations
        .route("/recommendations", post(handlers::recommend))
        // Reference tables (read-only)
        .nest("/reference", reference_routes())
}

/// Read-only reference data for UI selectors
fn reference_routes() -> Router<AppState> {
    Router::new()
        .route("/crops", get(handlers::list_crops))
        .route("/soils", get(handlers::list_soils))
        .route("/climate", get(handlers::list_climate))
}

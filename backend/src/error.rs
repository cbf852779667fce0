//! Error handling for the Crop Advisor server
//!
//! Every failure that reaches the request boundary becomes a `500` with a
//! JSON body of the form `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{InputError, LookupError, TaxonomyError};
use thiserror::Error;

use crate::classifier::InferenceError;
use crate::services::preprocess::DecodeError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Input(_) => "INPUT_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Inference(_) => "INFERENCE_ERROR",
            AppError::Lookup(_) => "LOOKUP_ERROR",
            AppError::Taxonomy(_) => "TAXONOMY_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error for debugging
        tracing::error!(code = self.code(), "Error: {:?}", self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

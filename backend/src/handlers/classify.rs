//! HTTP handlers for leaf disease classification

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use shared::{ClassificationReport, InputError};

use crate::error::AppResult;
use crate::AppState;

/// Multipart field carrying the leaf photograph
pub const IMAGE_FIELD: &str = "image";

/// Classify an uploaded leaf image
pub async fn classify(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ClassificationReport>> {
    let mut multipart =
        multipart.map_err(|rejection| InputError::MalformedUpload(rejection.body_text()))?;
    let image = read_image_field(&mut multipart).await?;

    let report = state.classification.classify_image(image).await?;
    Ok(Json(report))
}

async fn read_image_field(multipart: &mut Multipart) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| InputError::MalformedUpload(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| InputError::MalformedUpload(e.body_text()))?;
        return Ok(bytes.to_vec());
    }

    Err(InputError::MissingImage.into())
}

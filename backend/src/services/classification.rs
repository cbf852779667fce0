//! Leaf image classification pipeline: preprocess, infer, compose

use std::sync::Arc;

use shared::{validate_image_upload, ClassificationReport};

use crate::classifier::ClassifierService;
use crate::error::{AppError, AppResult};
use crate::services::diagnostic::DiagnosticService;
use crate::services::preprocess::ImagePreprocessor;

/// Runs an uploaded image through the full classification pipeline
#[derive(Clone)]
pub struct ClassificationService {
    preprocessor: ImagePreprocessor,
    classifier: Arc<ClassifierService>,
    diagnostics: DiagnosticService,
}

impl ClassificationService {
    /// Create a new ClassificationService instance
    pub fn new(
        preprocessor: ImagePreprocessor,
        classifier: Arc<ClassifierService>,
        diagnostics: DiagnosticService,
    ) -> Self {
        Self {
            preprocessor,
            classifier,
            diagnostics,
        }
    }

    /// Classify raw image bytes into a disease report
    pub async fn classify_image(&self, bytes: Vec<u8>) -> AppResult<ClassificationReport> {
        validate_image_upload(&bytes)?;

        // Decoding and resizing are CPU bound
        let preprocessor = self.preprocessor;
        let tensor = tokio::task::spawn_blocking(move || preprocessor.preprocess(&bytes))
            .await
            .map_err(|e| AppError::Internal(format!("Preprocessing task failed: {}", e)))??;

        let prediction = self.classifier.classify(tensor).await?;
        let report = self
            .diagnostics
            .compose(prediction.class, prediction.confidence)?;

        tracing::info!(
            disease = %report.disease,
            confidence = report.confidence,
            "Classified leaf image"
        );
        Ok(report)
    }
}

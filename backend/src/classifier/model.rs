//! Capability interface between the classifier service and an inference runtime

use std::sync::Arc;

use async_trait::async_trait;

use super::InferenceError;
use crate::services::preprocess::ImageTensor;

/// Fetches and initialises a model. Called at most once per successful load.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn DiseaseModel>, InferenceError>;
}

/// A loaded model ready for inference. Implementations must be safe to
/// call from several threads at once.
pub trait DiseaseModel: Send + Sync {
    /// Input shape the model accepts, `[batch, height, width, channels]`
    fn input_shape(&self) -> [usize; 4];

    /// Run inference on one preprocessed image
    fn predict(&self, input: &ImageTensor) -> Result<ProbabilityVector, InferenceError>;
}

/// Per-class probabilities, index-aligned with [`shared::DiseaseClass::ALL`]
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityVector(Vec<f32>);

impl ProbabilityVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index and value of the largest entry. Ties go to the lowest index.
    pub fn argmax(&self) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (index, &value) in self.0.iter().enumerate() {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((index, value)),
            }
        }
        best
    }

    /// Check the vector has one finite, non-negative entry per class
    pub fn validate(&self, expected_len: usize) -> Result<(), InferenceError> {
        if self.0.len() != expected_len {
            return Err(InferenceError::OutputMismatch {
                expected: expected_len,
                actual: self.0.len(),
            });
        }
        if let Some(&bad) = self.0.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(InferenceError::InvalidProbability(bad));
        }
        Ok(())
    }
}

/// Numerically stable softmax, for models that emit raw logits
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}

/// Probability as a whole percentage, 0-100
pub fn probability_to_percent(probability: f32) -> u8 {
    (f64::from(probability) * 100.0).round().clamp(0.0, 100.0) as u8
}

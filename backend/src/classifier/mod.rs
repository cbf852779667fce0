//! Leaf disease classifier service
//!
//! Owns the pretrained model. The model is loaded on first use and kept
//! for the lifetime of the process; concurrent first requests share one
//! in-flight load.

mod model;
mod onnx;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use shared::DiseaseClass;
use thiserror::Error;

use crate::services::preprocess::ImageTensor;

pub use model::{probability_to_percent, softmax, DiseaseModel, ModelLoader, ProbabilityVector};
pub use onnx::{OnnxDiseaseModel, OnnxModelLoader};

/// Inference module errors
#[derive(Error, Debug, Clone)]
pub enum InferenceError {
    #[error("Model could not be loaded: {0}")]
    LoadFailed(String),

    #[error("Model artifact checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Model load timed out after {0:?}")]
    LoadTimeout(Duration),

    #[error("Input shape {actual:?} does not match model input {expected:?}")]
    ShapeMismatch {
        expected: [usize; 4],
        actual: [usize; 4],
    },

    #[error("Model returned {actual} probabilities, expected {expected}")]
    OutputMismatch { expected: usize, actual: usize },

    #[error("Model returned an invalid probability: {0}")]
    InvalidProbability(f32),

    #[error("Inference timed out after {0:?}")]
    InferenceTimeout(Duration),

    #[error("Inference failed: {0}")]
    ExecutionFailed(String),
}

/// Lifecycle of the shared model
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Unloaded,
    Loading,
    Ready,
}

/// Outcome of classifying one image
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class: DiseaseClass,
    /// Probability of `class` as a percentage, 0-100
    pub confidence: u8,
    pub probabilities: ProbabilityVector,
}

/// One load of the model, awaited by every caller that arrives while it runs
type LoadAttempt = Shared<BoxFuture<'static, Result<Arc<dyn DiseaseModel>, InferenceError>>>;

enum ModelSlot {
    Unloaded,
    Loading(LoadAttempt),
    Ready(Arc<dyn DiseaseModel>),
}

impl ModelSlot {
    fn state(&self) -> LoadState {
        match self {
            ModelSlot::Unloaded => LoadState::Unloaded,
            ModelSlot::Loading(_) => LoadState::Loading,
            ModelSlot::Ready(_) => LoadState::Ready,
        }
    }
}

fn lock_slot(slot: &Mutex<ModelSlot>) -> MutexGuard<'_, ModelSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Classifier over a lazily loaded, process-wide model
pub struct ClassifierService {
    loader: Arc<dyn ModelLoader>,
    slot: Arc<Mutex<ModelSlot>>,
    load_timeout: Duration,
    inference_timeout: Duration,
}

impl ClassifierService {
    /// Create a service. Nothing is loaded until the first request.
    pub fn new(
        loader: Arc<dyn ModelLoader>,
        load_timeout: Duration,
        inference_timeout: Duration,
    ) -> Self {
        Self {
            loader,
            slot: Arc::new(Mutex::new(ModelSlot::Unloaded)),
            load_timeout,
            inference_timeout,
        }
    }

    pub fn state(&self) -> LoadState {
        lock_slot(&self.slot).state()
    }

    /// Return the loaded model, loading it first if needed.
    ///
    /// At most one load runs at a time. Callers arriving while it runs get
    /// that attempt's outcome, success or failure, within `load_timeout` of
    /// its start. A failed attempt leaves the service unloaded so a later
    /// request starts a fresh one.
    pub async fn ready(&self) -> Result<Arc<dyn DiseaseModel>, InferenceError> {
        let attempt = {
            let mut slot = lock_slot(&self.slot);
            match &*slot {
                ModelSlot::Ready(model) => return Ok(Arc::clone(model)),
                ModelSlot::Loading(attempt) => attempt.clone(),
                ModelSlot::Unloaded => {
                    let attempt = self.start_load();
                    *slot = ModelSlot::Loading(attempt.clone());
                    attempt
                }
            }
        };

        attempt.await
    }

    /// Spawn the load so it finishes even if every waiting request goes away
    fn start_load(&self) -> LoadAttempt {
        let loader = Arc::clone(&self.loader);
        let slot = Arc::clone(&self.slot);
        let load_timeout = self.load_timeout;

        let task = tokio::spawn({
            let slot = Arc::clone(&slot);
            async move {
                let started = Instant::now();
                tracing::info!("Loading disease classification model");

                let result = match tokio::time::timeout(load_timeout, loader.load()).await {
                    Ok(result) => result,
                    Err(_) => Err(InferenceError::LoadTimeout(load_timeout)),
                };

                match &result {
                    Ok(model) => {
                        tracing::info!(
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "Disease classification model ready"
                        );
                        *lock_slot(&slot) = ModelSlot::Ready(Arc::clone(model));
                    }
                    Err(e) => {
                        tracing::error!("Model load failed: {}", e);
                        *lock_slot(&slot) = ModelSlot::Unloaded;
                    }
                }
                result
            }
        });

        async move {
            match task.await {
                Ok(result) => result,
                Err(join_error) => {
                    *lock_slot(&slot) = ModelSlot::Unloaded;
                    Err(InferenceError::LoadFailed(join_error.to_string()))
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Run the model on a preprocessed image and return the validated
    /// probability vector
    pub async fn predict(&self, tensor: ImageTensor) -> Result<ProbabilityVector, InferenceError> {
        let model = self.ready().await?;

        let expected = model.input_shape();
        if tensor.shape() != expected {
            return Err(InferenceError::ShapeMismatch {
                expected,
                actual: tensor.shape(),
            });
        }

        let started = Instant::now();
        let task = tokio::task::spawn_blocking(move || model.predict(&tensor));
        let probabilities = match tokio::time::timeout(self.inference_timeout, task).await {
            Err(_) => return Err(InferenceError::InferenceTimeout(self.inference_timeout)),
            Ok(Err(join_error)) => {
                return Err(InferenceError::ExecutionFailed(join_error.to_string()))
            }
            Ok(Ok(result)) => result?,
        };

        probabilities.validate(DiseaseClass::COUNT)?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            probabilities = ?probabilities.values(),
            "Inference complete"
        );
        Ok(probabilities)
    }

    /// Predict and pick the most likely class
    pub async fn classify(&self, tensor: ImageTensor) -> Result<Prediction, InferenceError> {
        let probabilities = self.predict(tensor).await?;
        select_class(probabilities)
    }
}

/// Pick the most likely class from a validated probability vector
pub fn select_class(probabilities: ProbabilityVector) -> Result<Prediction, InferenceError> {
    let (index, probability) = probabilities
        .argmax()
        .ok_or(InferenceError::OutputMismatch {
            expected: DiseaseClass::COUNT,
            actual: 0,
        })?;
    let class = DiseaseClass::from_index(index).ok_or(InferenceError::OutputMismatch {
        expected: DiseaseClass::COUNT,
        actual: probabilities.len(),
    })?;

    Ok(Prediction {
        class,
        confidence: probability_to_percent(probability),
        probabilities,
    })
}

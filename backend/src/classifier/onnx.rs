//! ONNX runtime backed by tract

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use tract_onnx::prelude::*;

use super::model::{softmax, DiseaseModel, ModelLoader, ProbabilityVector};
use super::InferenceError;
use crate::external::ModelArtifactClient;
use crate::services::preprocess::{ImageTensor, CHANNELS};

type RunFn = dyn Fn(TVec<TValue>) -> TractResult<TVec<TValue>> + Send + Sync;

/// Loads an ONNX classifier from the configured artifact source
pub struct OnnxModelLoader {
    artifacts: ModelArtifactClient,
    input_size: usize,
    apply_softmax: bool,
}

impl OnnxModelLoader {
    pub fn new(artifacts: ModelArtifactClient, input_size: u32, apply_softmax: bool) -> Self {
        Self {
            artifacts,
            input_size: input_size as usize,
            apply_softmax,
        }
    }
}

#[async_trait]
impl ModelLoader for OnnxModelLoader {
    async fn load(&self) -> Result<Arc<dyn DiseaseModel>, InferenceError> {
        let bytes = self.artifacts.fetch().await?;
        let input_size = self.input_size;
        let apply_softmax = self.apply_softmax;

        // Graph optimisation is CPU bound
        let model = tokio::task::spawn_blocking(move || {
            OnnxDiseaseModel::from_bytes(&bytes, input_size, apply_softmax)
        })
        .await
        .map_err(|e| InferenceError::LoadFailed(e.to_string()))??;

        Ok(Arc::new(model))
    }
}

/// An optimised tract plan for an NHWC image classifier
pub struct OnnxDiseaseModel {
    run: Box<RunFn>,
    input_shape: [usize; 4],
    apply_softmax: bool,
}

impl OnnxDiseaseModel {
    /// Parse and optimise an ONNX graph with input `[1, size, size, 3]`
    pub fn from_bytes(
        bytes: &[u8],
        input_size: usize,
        apply_softmax: bool,
    ) -> Result<Self, InferenceError> {
        let input_shape = [1, input_size, input_size, CHANNELS];

        let plan = tract_onnx::onnx()
            .model_for_read(&mut Cursor::new(bytes))
            .and_then(|model| model.with_input_fact(0, f32::fact(input_shape).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::LoadFailed(format!("Invalid ONNX model: {}", e)))?;

        Ok(Self {
            run: Box::new(move |inputs: TVec<TValue>| plan.run(inputs)),
            input_shape,
            apply_softmax,
        })
    }
}

impl DiseaseModel for OnnxDiseaseModel {
    fn input_shape(&self) -> [usize; 4] {
        self.input_shape
    }

    fn predict(&self, input: &ImageTensor) -> Result<ProbabilityVector, InferenceError> {
        let tensor = Tensor::from_shape(&input.shape(), input.data())
            .map_err(|e| InferenceError::ExecutionFailed(e.to_string()))?;

        let outputs = (self.run)(tvec!(tensor.into()))
            .map_err(|e| InferenceError::ExecutionFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::ExecutionFailed("Model produced no output".into()))?;
        let values: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::ExecutionFailed(e.to_string()))?
            .iter()
            .copied()
            .collect();

        let values = if self.apply_softmax {
            softmax(&values)
        } else {
            values
        };
        Ok(ProbabilityVector::new(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bytes_that_are_not_onnx() {
        let result = OnnxDiseaseModel::from_bytes(b"not a model", 224, false);
        assert!(matches!(result, Err(InferenceError::LoadFailed(_))));
    }
}

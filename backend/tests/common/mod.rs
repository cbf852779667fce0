//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crop_advisor_backend::classifier::{
    DiseaseModel, InferenceError, ModelLoader, ProbabilityVector,
};
use crop_advisor_backend::services::preprocess::ImageTensor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};

/// Model that returns the same probabilities for every input
pub struct FixedModel {
    pub probabilities: Vec<f32>,
    pub input_shape: [usize; 4],
    pub delay: Duration,
}

impl DiseaseModel for FixedModel {
    fn input_shape(&self) -> [usize; 4] {
        self.input_shape
    }

    fn predict(&self, _input: &ImageTensor) -> Result<ProbabilityVector, InferenceError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(ProbabilityVector::new(self.probabilities.clone()))
    }
}

/// Loader that counts how often it is invoked
pub struct CountingLoader {
    pub loads: Arc<AtomicUsize>,
    pub load_delay: Duration,
    /// Number of initial loads that fail before one succeeds
    pub failures: usize,
    pub probabilities: Vec<f32>,
    pub input_shape: [usize; 4],
    pub inference_delay: Duration,
}

impl CountingLoader {
    pub fn new(probabilities: Vec<f32>) -> Self {
        Self {
            loads: Arc::new(AtomicUsize::new(0)),
            load_delay: Duration::from_millis(0),
            failures: 0,
            probabilities,
            input_shape: [1, 224, 224, 3],
            inference_delay: Duration::from_millis(0),
        }
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn with_failures(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }

    pub fn with_inference_delay(mut self, delay: Duration) -> Self {
        self.inference_delay = delay;
        self
    }

    pub fn load_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.loads)
    }
}

#[async_trait]
impl ModelLoader for CountingLoader {
    async fn load(&self) -> Result<Arc<dyn DiseaseModel>, InferenceError> {
        let attempt = self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }
        if attempt < self.failures {
            return Err(InferenceError::LoadFailed("artifact unavailable".to_string()));
        }
        Ok(Arc::new(FixedModel {
            probabilities: self.probabilities.clone(),
            input_shape: self.input_shape,
            delay: self.inference_delay,
        }))
    }
}

/// PNG-encoded solid colour image
pub fn png_bytes(width: u32, height: u32, pixel: [u8; 3]) -> Vec<u8> {
    let image = ImageBuffer::from_pixel(width, height, Rgb(pixel));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// A correctly shaped tensor of zeros
pub fn blank_tensor() -> ImageTensor {
    ImageTensor::from_shape([1, 224, 224, 3], vec![0.0; 224 * 224 * 3]).unwrap()
}

//! Image preprocessing for the leaf disease classifier
//!
//! Decodes an uploaded image, resizes it to the model's input size with
//! bilinear interpolation and scales pixel values to `[0, 1]`. The result
//! is an NHWC tensor with a batch dimension of one.

use image::imageops::FilterType;
use image::GenericImageView;
use thiserror::Error;

/// Default model input edge length in pixels
pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// Number of colour channels fed to the model
pub const CHANNELS: usize = 3;

/// Image bytes that could not be turned into a tensor
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Image is empty")]
    Empty,

    #[error("Could not decode image: {0}")]
    Malformed(#[from] image::ImageError),

    #[error("Image has zero width or height")]
    ZeroSized,
}

/// Dense `f32` tensor in NHWC layout
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    shape: [usize; 4],
    data: Vec<f32>,
}

impl ImageTensor {
    /// Wrap raw data. Returns `None` when `data` does not fill `shape` exactly.
    pub fn from_shape(shape: [usize; 4], data: Vec<f32>) -> Option<Self> {
        if shape.iter().product::<usize>() != data.len() {
            return None;
        }
        Some(Self { shape, data })
    }

    /// `[batch, height, width, channels]`
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}

/// Turns raw upload bytes into model input tensors
#[derive(Debug, Clone, Copy)]
pub struct ImagePreprocessor {
    input_size: u32,
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_SIZE)
    }
}

impl ImagePreprocessor {
    pub fn new(input_size: u32) -> Self {
        Self { input_size }
    }

    /// Shape of every tensor this preprocessor produces
    pub fn output_shape(&self) -> [usize; 4] {
        let size = self.input_size as usize;
        [1, size, size, CHANNELS]
    }

    /// Decode, resize to `input_size × input_size` and normalise to `[0, 1]`.
    ///
    /// Grayscale and alpha images are converted to RGB first.
    pub fn preprocess(&self, bytes: &[u8]) -> Result<ImageTensor, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }

        let image = image::load_from_memory(bytes)?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::ZeroSized);
        }

        let rgb = image.to_rgb8();
        let resized = image::imageops::resize(
            &rgb,
            self.input_size,
            self.input_size,
            FilterType::Triangle,
        );

        let data: Vec<f32> = resized
            .into_raw()
            .into_iter()
            .map(|v| v as f32 / 255.0)
            .collect();

        tracing::debug!(
            source_width = width,
            source_height = height,
            input_size = self.input_size,
            "Preprocessed image"
        );

        Ok(ImageTensor {
            shape: self.output_shape(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, Rgb, Rgba};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn solid_png(width: u32, height: u32, pixel: [u8; 3]) -> Vec<u8> {
        let image = ImageBuffer::from_pixel(width, height, Rgb(pixel));
        encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)
    }

    #[test]
    fn output_shape_is_fixed() {
        let preprocessor = ImagePreprocessor::default();
        for (w, h) in [(224, 224), (640, 480), (31, 500), (1, 1)] {
            let tensor = preprocessor.preprocess(&solid_png(w, h, [10, 20, 30])).unwrap();
            assert_eq!(tensor.shape(), [1, 224, 224, 3]);
            assert_eq!(tensor.data().len(), 224 * 224 * 3);
        }
    }

    #[test]
    fn values_are_scaled_to_unit_range() {
        let preprocessor = ImagePreprocessor::default();
        let tensor = preprocessor.preprocess(&solid_png(300, 200, [255, 0, 128])).unwrap();

        assert!(tensor.data().iter().all(|v| (0.0..=1.0).contains(v)));
        let first = &tensor.data()[..3];
        assert!((first[0] - 1.0).abs() < 1.0 / 255.0);
        assert!(first[1].abs() < 1.0 / 255.0);
        assert!((first[2] - 128.0 / 255.0).abs() < 1.0 / 255.0);
    }

    #[test]
    fn grayscale_is_expanded_to_rgb() {
        let image = ImageBuffer::from_pixel(50, 50, Luma([200u8]));
        let bytes = encode(DynamicImage::ImageLuma8(image), ImageFormat::Png);
        let tensor = ImagePreprocessor::default().preprocess(&bytes).unwrap();

        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        let pixel = &tensor.data()[..3];
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    #[test]
    fn alpha_channel_is_dropped() {
        let image = ImageBuffer::from_pixel(64, 64, Rgba([0u8, 255, 0, 10]));
        let bytes = encode(DynamicImage::ImageRgba8(image), ImageFormat::Png);
        let tensor = ImagePreprocessor::default().preprocess(&bytes).unwrap();
        assert_eq!(tensor.data().len(), 224 * 224 * 3);
    }

    #[test]
    fn custom_input_size() {
        let tensor = ImagePreprocessor::new(32)
            .preprocess(&solid_png(100, 100, [1, 2, 3]))
            .unwrap();
        assert_eq!(tensor.shape(), [1, 32, 32, 3]);
    }

    #[test]
    fn empty_bytes_are_rejected() {
        let err = ImagePreprocessor::default().preprocess(&[]).unwrap_err();
        assert!(matches!(err, DecodeError::Empty));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = ImagePreprocessor::default()
            .preprocess(b"definitely not an image")
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn truncated_png_is_rejected() {
        let bytes = solid_png(20, 20, [1, 2, 3]);
        let err = ImagePreprocessor::default()
            .preprocess(&bytes[..bytes.len() / 2])
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn tensor_shape_must_match_data() {
        assert!(ImageTensor::from_shape([1, 2, 2, 3], vec![0.0; 12]).is_some());
        assert!(ImageTensor::from_shape([1, 2, 2, 3], vec![0.0; 11]).is_none());
    }
}

//! Error types for lookups and request input

use thiserror::Error;

/// An id that is not present in a reference table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("Unknown soil type: {0}")]
    UnknownSoil(String),

    #[error("Unknown disease: {0}")]
    UnknownDisease(String),
}

/// Missing or malformed request input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("No image provided")]
    MissingImage,

    #[error("No crop selected")]
    MissingCrop,

    #[error("No soil type selected")]
    MissingSoil,

    #[error("Desired yield must be a positive number, got {0}")]
    InvalidYield(f64),

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),
}

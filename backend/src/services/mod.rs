//! Business logic services for the Crop Advisor platform

pub mod classification;
pub mod diagnostic;
pub mod preprocess;
pub mod recommendation;

pub use classification::ClassificationService;
pub use diagnostic::DiagnosticService;
pub use preprocess::ImagePreprocessor;
pub use recommendation::RecommendationService;

//! External integrations

pub mod model_artifact;

pub use model_artifact::{ModelArtifactClient, ModelSource};

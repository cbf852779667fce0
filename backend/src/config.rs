//! Configuration management for the Crop Advisor server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides named `CROP_ADVISOR__<SECTION>__<KEY>`,
//!    e.g. `CROP_ADVISOR__MODEL__SOURCE`
//!
//! `CROP_ADVISOR_ENVIRONMENT` picks which configuration file is read.

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::LookupPolicy;

/// Default location of the leaf disease model
pub const DEFAULT_MODEL_SOURCE: &str = "models/plant_disease.onnx";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Disease classification model configuration
    pub model: ModelConfig,

    /// Image upload limits
    pub upload: UploadConfig,

    /// Suitability scoring configuration
    pub scoring: ScoringConfig,

    /// Disease taxonomy configuration
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// ONNX model location: an http(s) URL or a local file path
    pub source: String,

    /// Expected SHA-256 of the model artifact, hex encoded
    pub sha256: Option<String>,

    /// Width and height the model expects, in pixels
    pub input_size: u32,

    /// Apply softmax to the model output (for models that emit logits)
    pub apply_softmax: bool,

    /// Start loading the model at startup instead of on first request
    pub preload: bool,

    /// Upper bound on fetching and initialising the model
    pub load_timeout_secs: u64,

    /// Upper bound on a single inference call
    pub inference_timeout_secs: u64,
}

impl ModelConfig {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Largest accepted request body in bytes
    pub max_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    /// Whether unknown crop/soil ids default or are rejected
    pub lookup_policy: LookupPolicy,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaxonomyConfig {
    /// JSON file replacing the built-in disease taxonomy
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ADVISOR_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("model.source", DEFAULT_MODEL_SOURCE)?
            .set_default("model.input_size", 224)?
            .set_default("model.apply_softmax", false)?
            .set_default("model.preload", false)?
            .set_default("model.load_timeout_secs", 60)?
            .set_default("model.inference_timeout_secs", 30)?
            .set_default("upload.max_bytes", 10 * 1024 * 1024)?
            .set_default("scoring.lookup_policy", "lenient")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ADVISOR__ prefix)
            .add_source(
                Environment::with_prefix("CROP_ADVISOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_MODEL_SOURCE.to_string(),
            sha256: None,
            input_size: 224,
            apply_softmax: false,
            preload: false,
            load_timeout_secs: 60,
            inference_timeout_secs: 30,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            lookup_policy: LookupPolicy::Lenient,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            upload: UploadConfig::default(),
            scoring: ScoringConfig::default(),
            taxonomy: TaxonomyConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_overrides_use_double_underscore_sections() {
        std::env::set_var("CROP_ADVISOR__MODEL__INPUT_SIZE", "256");
        std::env::set_var("CROP_ADVISOR__SCORING__LOOKUP_POLICY", "strict");
        let config = Config::load();
        std::env::remove_var("CROP_ADVISOR__MODEL__INPUT_SIZE");
        std::env::remove_var("CROP_ADVISOR__SCORING__LOOKUP_POLICY");

        let config = config.unwrap();
        assert_eq!(config.model.input_size, 256);
        assert_eq!(config.scoring.lookup_policy, LookupPolicy::Strict);
        assert_eq!(config.server.port, 3000);
    }
}

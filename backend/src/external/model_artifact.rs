//! Model artifact client
//!
//! Fetches the pretrained classifier from an HTTP(S) URL or a local file
//! and optionally checks its SHA-256 digest.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use sha2::{Digest, Sha256};

use crate::classifier::InferenceError;

/// Where the model artifact lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Url(String),
    File(PathBuf),
}

impl ModelSource {
    /// `http://` and `https://` sources are fetched over the network,
    /// anything else is read from disk.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            ModelSource::Url(source.to_string())
        } else {
            ModelSource::File(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Url(url) => write!(f, "{}", url),
            ModelSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Client for downloading the model artifact
#[derive(Clone)]
pub struct ModelArtifactClient {
    source: ModelSource,
    sha256: Option<String>,
    http_client: Client,
}

impl ModelArtifactClient {
    /// Create a new artifact client
    pub fn new(
        source: ModelSource,
        sha256: Option<String>,
        timeout: Duration,
    ) -> Result<Self, InferenceError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::LoadFailed(format!("HTTP client: {}", e)))?;

        Ok(Self {
            source,
            sha256: sha256.map(|s| s.trim().to_ascii_lowercase()),
            http_client,
        })
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    /// Fetch the artifact bytes and verify the digest when one is configured
    pub async fn fetch(&self) -> Result<Vec<u8>, InferenceError> {
        tracing::info!(source = %self.source, "Fetching model artifact");

        let bytes = match &self.source {
            ModelSource::Url(url) => self.download(url).await?,
            ModelSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
                InferenceError::LoadFailed(format!("Cannot read {}: {}", path.display(), e))
            })?,
        };

        self.verify(&bytes)?;
        tracing::info!(bytes = bytes.len(), "Model artifact fetched");
        Ok(bytes)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, InferenceError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| InferenceError::LoadFailed(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(InferenceError::LoadFailed(format!(
                "Model host returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| InferenceError::LoadFailed(format!("Failed to read body: {}", e)))?;

        Ok(bytes.to_vec())
    }

    fn verify(&self, bytes: &[u8]) -> Result<(), InferenceError> {
        let Some(expected) = &self.sha256 else {
            return Ok(());
        };

        let actual = sha256_hex(bytes);
        if &actual != expected {
            return Err(InferenceError::ChecksumMismatch {
                expected: expected.clone(),
                actual,
            });
        }
        Ok(())
    }
}

/// Lower-case hex SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

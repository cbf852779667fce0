//! Crop Advisor Platform - Backend
//!
//! Planting suitability scoring and leaf disease classification over HTTP.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_TYPE,
        },
        HeaderName, HeaderValue,
    },
    routing::{get, post},
    Router,
};
use shared::{DiseaseTaxonomy, ReferenceTables, StaticReferenceTables};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub mod classifier;
pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use classifier::{ClassifierService, ModelLoader, OnnxModelLoader};
use error::{AppError, AppResult};
use external::{ModelArtifactClient, ModelSource};
use services::{
    ClassificationService, DiagnosticService, ImagePreprocessor, RecommendationService,
};

/// Request headers browsers may send cross-origin
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tables: Arc<dyn ReferenceTables>,
    pub classifier: Arc<ClassifierService>,
    pub recommendations: RecommendationService,
    pub classification: ClassificationService,
}

impl AppState {
    /// Wire up services from explicit collaborators
    pub fn new(
        config: Config,
        tables: Arc<dyn ReferenceTables>,
        taxonomy: Arc<DiseaseTaxonomy>,
        loader: Arc<dyn ModelLoader>,
    ) -> Self {
        let classifier = Arc::new(ClassifierService::new(
            loader,
            config.model.load_timeout(),
            config.model.inference_timeout(),
        ));
        let recommendations =
            RecommendationService::new(Arc::clone(&tables), config.scoring.lookup_policy);
        let classification = ClassificationService::new(
            ImagePreprocessor::new(config.model.input_size),
            Arc::clone(&classifier),
            DiagnosticService::new(taxonomy),
        );

        Self {
            config: Arc::new(config),
            tables,
            classifier,
            recommendations,
            classification,
        }
    }

    /// Build production state: built-in reference tables, the configured
    /// taxonomy and the ONNX model loader
    pub fn from_config(config: Config) -> AppResult<Self> {
        let taxonomy = load_taxonomy(&config)?;
        let artifacts = ModelArtifactClient::new(
            ModelSource::parse(&config.model.source),
            config.model.sha256.clone(),
            config.model.load_timeout(),
        )?;
        let loader =
            OnnxModelLoader::new(artifacts, config.model.input_size, config.model.apply_softmax);

        Ok(Self::new(
            config,
            Arc::new(StaticReferenceTables::builtin()),
            Arc::new(taxonomy),
            Arc::new(loader),
        ))
    }
}

/// Built-in taxonomy, or the JSON file named in `taxonomy.path`
fn load_taxonomy(config: &Config) -> AppResult<DiseaseTaxonomy> {
    match &config.taxonomy.path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                AppError::Internal(format!("Cannot read taxonomy file {}: {}", path, e))
            })?;
            let taxonomy = DiseaseTaxonomy::from_json_str(&json)?;
            tracing::info!("Loaded disease taxonomy from {}", path);
            Ok(taxonomy)
        }
        None => Ok(DiseaseTaxonomy::builtin()),
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    let body_limit = state.config.upload.max_bytes;

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .route("/classify", post(handlers::classify))
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        // Answers every OPTIONS request with an empty 200
        .layer(cors)
        // Exact CORS header values on every response, preflights included
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Advisor Platform API v1.0"
}

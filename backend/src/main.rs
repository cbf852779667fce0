//! Crop Advisor Platform - Backend Server
//!
//! Serves planting recommendations and leaf disease classification for
//! smallholder farmers.

use std::net::SocketAddr;

use crop_advisor_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "crop_advisor_server=debug,crop_advisor_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Crop Advisor Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Model source: {}", config.model.source);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let preload = config.model.preload;

    // Create application state
    let state = AppState::from_config(config)?;

    if preload {
        let classifier = state.classifier.clone();
        tokio::spawn(async move {
            if let Err(e) = classifier.ready().await {
                tracing::warn!("Model preload failed, will retry on first request: {}", e);
            }
        });
    } else {
        tracing::info!("Model will be loaded on first classification request");
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

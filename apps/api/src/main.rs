mod config;
mod errors;
mod inference;
mod preprocess;
mod routes;
mod schema;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::inference::InferenceAdapter;
use crate::preprocess::TextNormalizer;
use crate::routes::{build_cors_layer, build_router};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Teacher Evaluation Prediction API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize text normalization resources
    let normalizer = Arc::new(TextNormalizer::new(config.normalizer_config()));
    normalizer.warm_up();

    // Load the model artifact once; it is never reloaded
    let adapter = load_adapter(&config)?;
    info!(
        "Model version {} (loaded: {}, response format: {})",
        adapter.version(),
        adapter.model_loaded(),
        adapter.policy()
    );

    // Build app state
    let state = AppState {
        adapter: Arc::new(adapter),
        normalizer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors_layer(&config.cors_allowed_origins)?),
    );
    info!("CORS origins: {:?}", config.cors_allowed_origins);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads the model artifact. A failure aborts startup unless `MODEL_REQUIRED`
/// is off, in which case the service runs without a model.
fn load_adapter(config: &Config) -> Result<InferenceAdapter> {
    match InferenceAdapter::load(
        &config.model_path,
        config.model_version.clone(),
        config.response_policy,
    ) {
        Ok(adapter) => Ok(adapter),
        Err(e) if !config.model_required => {
            warn!("Model unavailable, serving without it: {e}");
            Ok(InferenceAdapter::new(
                None,
                config.model_version.clone(),
                config.response_policy,
            ))
        }
        Err(e) => Err(e).with_context(|| {
            format!(
                "Failed to load model artifact from {}",
                config.model_path.display()
            )
        }),
    }
}

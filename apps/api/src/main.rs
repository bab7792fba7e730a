mod chat;
mod config;
mod cv_source;
mod errors;
mod feedback;
mod llm_client;
mod matching;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::cv_source::{CvTextSource, HttpPdfSource};
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting internmatch API v{}", env!("CARGO_PKG_VERSION"));

    let generator = build_generator(&config);

    let cv_source: Arc<dyn CvTextSource> =
        Arc::new(HttpPdfSource::new().context("Failed to build CV fetch client")?);

    let state = AppState::new(generator, cv_source);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the Gemini client when a key is configured. A failed build is logged and
/// the service continues without AI, same as an unset key.
fn build_generator(config: &Config) -> Option<Arc<dyn TextGenerator>> {
    let Some(api_key) = config.gemini_api_key.clone() else {
        warn!("GEMINI_API_KEY not set; matching runs local-only and CV feedback is disabled");
        return None;
    };

    match GeminiClient::new(api_key, config.gemini_model.clone()) {
        Ok(client) => {
            info!("Gemini client initialized (model: {})", client.model());
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("Gemini client init failed, continuing without AI: {e}");
            None
        }
    }
}

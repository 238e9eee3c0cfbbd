mod config;
mod errors;
mod llm_client;
mod matching;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::matching::engine::EngineSet;
use crate::matching::orchestrator::FallbackOrchestrator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Build and validate every weight profile (bad tables abort startup)
    let engines = Arc::new(EngineSet::new()?);
    info!(
        "Scoring engines ready (default profile: {})",
        config.default_profile.as_str()
    );

    // Initialize the optional AI collaborator
    let orchestrator = match config.ai_api_key() {
        Some(key) => {
            let llm = LlmClient::new(key.to_string(), config.ai_timeout)?;
            let retry = llm.retry_policy();
            info!(
                "AI enrichment enabled (model: {}, timeout: {}ms, {} attempts of {}ms)",
                llm_client::MODEL,
                config.ai_timeout.as_millis(),
                retry.attempts,
                retry.attempt_timeout.as_millis()
            );
            let llm: Arc<dyn TextGenerator> = Arc::new(llm);
            FallbackOrchestrator::new(Some(llm), config.ai_timeout)
        }
        None => {
            info!("AI enrichment disabled, serving deterministic scores only");
            FallbackOrchestrator::deterministic_only()
        }
    };

    let state = AppState {
        engines,
        orchestrator,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

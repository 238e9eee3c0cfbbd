use std::sync::Arc;

use crate::config::Config;
use crate::matching::engine::EngineSet;
use crate::matching::orchestrator::FallbackOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no mutable state: engines are validated once at startup and read-only after.
#[derive(Clone)]
pub struct AppState {
    pub engines: Arc<EngineSet>,
    /// Wraps the optional LLM collaborator. Deterministic-only when no API key is set.
    pub orchestrator: FallbackOrchestrator,
    pub config: Config,
}

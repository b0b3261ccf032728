use std::sync::Arc;

use crate::compose::busy::BusyFlags;
use crate::dispatch::Mailer;
use crate::llm_client::LlmClient;
use crate::stats::StatsStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Live SMTP transport, or the simulation fallback when no credentials
    /// are configured.
    pub mailer: Arc<Mailer>,
    /// File-backed usage counters, injected rather than ambient.
    pub stats: Arc<StatsStore>,
    /// One-in-flight discipline per action class for the compose session.
    pub busy: Arc<BusyFlags>,
}

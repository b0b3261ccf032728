mod compose;
mod config;
mod dispatch;
mod errors;
mod extract;
mod generation;
mod llm_client;
mod routes;
mod state;
mod stats;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compose::busy::BusyFlags;
use crate::config::Config;
use crate::dispatch::Mailer;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::stats::StatsStore;

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

    info!("Starting applymail API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (generation fails with an actionable error when
    // the key is absent; the rest of the app still works)
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    if config.anthropic_api_key.is_none() {
        info!("ANTHROPIC_API_KEY not set; generation endpoints will reject requests");
    }

    // Initialize mail transport, or simulation mode without credentials
    let mailer = Mailer::from_config(config.smtp.as_ref())?;
    if mailer.is_simulated() {
        info!("SMTP credentials not set; dispatcher running in simulation mode");
    } else {
        info!("SMTP transport initialized");
    }

    // Load usage counters once; saved back after every change
    let stats = StatsStore::load(&config.stats_path);
    info!("Usage stats loaded from {}", config.stats_path);

    let state = AppState {
        llm,
        mailer: Arc::new(mailer),
        stats: Arc::new(stats),
        busy: Arc::new(BusyFlags::default()),
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

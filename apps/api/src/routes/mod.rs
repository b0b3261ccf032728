pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{compose, dispatch, extract, generation, stats};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction
        .route("/api/v1/extract", post(extract::handlers::handle_extract))
        // Generation
        .route(
            "/api/v1/generate/improve",
            post(generation::handlers::handle_improve),
        )
        .route(
            "/api/v1/generate/cover-letter",
            post(generation::handlers::handle_cover_letter),
        )
        .route(
            "/api/v1/generate/application",
            post(generation::handlers::handle_application),
        )
        // Dispatch boundary
        .route("/api/v1/send", post(dispatch::handlers::handle_send))
        // Compose workflow
        .route(
            "/api/v1/compose/send",
            post(compose::handlers::handle_compose_send),
        )
        .route(
            "/api/v1/compose/application",
            post(compose::handlers::handle_compose_application),
        )
        // Usage counter
        .route("/api/v1/stats", get(stats::handlers::handle_get_stats))
        .route(
            "/api/v1/stats/reset",
            post(stats::handlers::handle_reset_stats),
        )
        .with_state(state)
}

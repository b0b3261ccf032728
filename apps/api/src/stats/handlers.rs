//! Axum route handlers for the usage counter.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::stats::UsageStats;

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
}

/// GET /api/v1/stats
pub async fn handle_get_stats(State(state): State<AppState>) -> Json<UsageStats> {
    Json(state.stats.snapshot())
}

/// POST /api/v1/stats/reset
///
/// Zeroes both counters only when the submitted code matches the fixed
/// constant; otherwise the counters are untouched and `success` is false.
pub async fn handle_reset_stats(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Result<Json<ResetResponse>, AppError> {
    let success = state
        .stats
        .reset(&request.code)
        .map_err(AppError::Internal)?;

    Ok(Json(ResetResponse { success }))
}

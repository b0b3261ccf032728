//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::compose::busy::Action;
use crate::errors::AppError;
use crate::generation::engine::{
    generate_cover_letter, generate_personalized_application, improve_draft, ApplicationDraft,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub cv: String,
    pub job_description: String,
    pub tone: Option<String>,
    pub additional_instructions: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub letter: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub recipient_email: String,
    pub cv: String,
    pub job_description: Option<String>,
    pub personal_notes: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate/improve
///
/// Rewrites a draft message, fixing grammar and tone in the same language.
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let _busy = state.busy.acquire(Action::Improving)?;

    let message = improve_draft(&request.message, &state.llm).await?;

    Ok(Json(ImproveResponse { message }))
}

/// POST /api/v1/generate/cover-letter
///
/// Writes a cover letter from a CV and job description. Tone defaults to
/// "neutral" when absent.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let _busy = state.busy.acquire(Action::Generating)?;

    let letter = generate_cover_letter(
        &request.cv,
        &request.job_description,
        request.tone.as_deref(),
        request.additional_instructions.as_deref(),
        &state.llm,
    )
    .await?;

    Ok(Json(CoverLetterResponse { letter }))
}

/// POST /api/v1/generate/application
///
/// Drafts a complete application email (subject + body) personalized to the
/// recipient's email domain.
pub async fn handle_application(
    State(state): State<AppState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Json<ApplicationDraft>, AppError> {
    let _busy = state.busy.acquire(Action::Generating)?;

    let draft = generate_personalized_application(
        &request.recipient_email,
        &request.cv,
        request.job_description.as_deref(),
        request.personal_notes.as_deref(),
        &state.llm,
    )
    .await?;

    Ok(Json(draft))
}

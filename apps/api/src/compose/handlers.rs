//! Axum route handlers for the compose workflow.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::compose::busy::Action;
use crate::compose::split_recipients;
use crate::dispatch::{is_valid_email, text_to_html, EmailAttachment, EmailRequest};
use crate::errors::AppError;
use crate::extract::{extract_text, resolve_mime};
use crate::generation::engine::{generate_personalized_application, ApplicationDraft};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ComposeSendRequest {
    /// Raw recipient text as typed by the user; split on newline/comma/semicolon.
    pub recipients: String,
    pub subject: String,
    /// Plain text; escaped and `<br>`-converted here, never trusted as HTML.
    pub message: String,
    pub attachment: Option<EmailAttachment>,
}

#[derive(Debug, Serialize)]
pub struct ComposeSendResponse {
    pub success: bool,
    pub message: String,
    pub simulated: bool,
    pub recipients: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/compose/send
///
/// The primary send workflow: split and validate recipients, escape the plain
/// text body, dispatch once to the full list, then bump the usage counters.
/// The attachment (the CV) is required on this path.
pub async fn handle_compose_send(
    State(state): State<AppState>,
    Json(request): Json<ComposeSendRequest>,
) -> Result<Json<ComposeSendResponse>, AppError> {
    let _busy = state.busy.acquire(Action::Sending)?;

    let recipients = split_recipients(&request.recipients);
    if recipients.is_empty() {
        return Err(AppError::Validation(
            "at least one recipient is required".to_string(),
        ));
    }
    if let Some(bad) = recipients.iter().find(|r| !is_valid_email(r)) {
        return Err(AppError::Validation(format!(
            "invalid recipient address: {bad}"
        )));
    }

    let attachment = request.attachment.ok_or_else(|| {
        AppError::Validation("a CV attachment is required to send applications".to_string())
    })?;

    let email = EmailRequest {
        to: recipients.clone(),
        subject: request.subject.clone(),
        html: text_to_html(&request.message),
        attachment: Some(attachment),
    };

    let outcome = state.mailer.send_email(&email).await?;

    // One CV and one email per recipient went out on this dispatch
    let count = recipients.len() as u64;
    state
        .stats
        .increment(count, count)
        .map_err(AppError::Internal)?;

    info!(recipients = recipients.len(), simulated = outcome.simulated, "compose send complete");

    Ok(Json(ComposeSendResponse {
        success: true,
        message: outcome.message,
        simulated: outcome.simulated,
        recipients: recipients.len(),
    }))
}

/// POST /api/v1/compose/application
///
/// Multipart pipeline: CV file + recipient → extract text → generate a
/// personalized application draft. The file is read within this request only;
/// its bytes are never stored.
pub async fn handle_compose_application(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApplicationDraft>, AppError> {
    let _busy = state.busy.acquire(Action::Generating)?;

    let mut cv_text: Option<String> = None;
    let mut recipient_email: Option<String> = None;
    let mut job_description: Option<String> = None;
    let mut personal_notes: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart upload: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(String::from);
                let mime = resolve_mime(field.content_type(), filename.as_deref());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
                cv_text = Some(extract_text(&data, &mime)?);
            }
            Some("recipient_email") => recipient_email = Some(read_text_field(field).await?),
            Some("job_description") => job_description = Some(read_text_field(field).await?),
            Some("personal_notes") => personal_notes = Some(read_text_field(field).await?),
            _ => {}
        }
    }

    let cv = cv_text
        .ok_or_else(|| AppError::Validation("a CV file field is required".to_string()))?;
    if cv.trim().is_empty() {
        return Err(AppError::EmptyCv);
    }
    let recipient = recipient_email
        .ok_or_else(|| AppError::Validation("recipient_email is required".to_string()))?;

    let draft = generate_personalized_application(
        &recipient,
        &cv,
        job_description.as_deref(),
        personal_notes.as_deref(),
        &state.llm,
    )
    .await?;

    Ok(Json(draft))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("failed to read form field: {e}")))
}

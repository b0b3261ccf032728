use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dispatch::DispatchError;
use crate::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse document: {0}")]
    Parse(String),

    #[error("CV text is empty")]
    EmptyCv,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Another {0} operation is already in progress")]
    Busy(&'static str),

    #[error("Email dispatch failed: {0}")]
    Transport(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Invalid API credential")]
    InvalidCredential,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UnsupportedFormat(mime) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file format: {mime}"),
            ),
            AppError::Parse(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PARSE_ERROR",
                format!("Failed to parse document: {msg}"),
            ),
            AppError::EmptyCv => (
                StatusCode::BAD_REQUEST,
                "EMPTY_CV",
                "No text could be read from the CV".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Busy(action) => (
                StatusCode::CONFLICT,
                "BUSY",
                format!("Another {action} operation is already in progress"),
            ),
            AppError::Transport(msg) => {
                tracing::error!("Transport error: {msg}");
                (StatusCode::BAD_GATEWAY, "TRANSPORT_ERROR", msg.clone())
            }
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR", msg.clone())
            }
            AppError::InvalidCredential => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_CREDENTIAL",
                "The AI API key is missing or invalid. Check ANTHROPIC_API_KEY.".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnsupportedFormat(mime) => AppError::UnsupportedFormat(mime),
            ExtractError::Parse(msg) => AppError::Parse(msg),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::InvalidCredential => AppError::InvalidCredential,
            other => AppError::Generation(other.to_string()),
        }
    }
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::Validation(msg) => AppError::Validation(msg),
            DispatchError::Transport(msg) => AppError::Transport(msg),
        }
    }
}

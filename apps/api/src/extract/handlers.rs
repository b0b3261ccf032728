//! Axum route handler for the upload-and-extract endpoint.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{extract_text, resolve_mime};

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /api/v1/extract
///
/// Accepts a multipart form with one file field and returns the extracted
/// plain text. The first field carrying a file wins; an upload with no file
/// or an empty file is rejected before extraction.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart upload: {e}")))?
    {
        if field.file_name().is_none() {
            continue;
        }

        let filename = field.file_name().map(String::from);
        let mime = resolve_mime(field.content_type(), filename.as_deref());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        if data.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }

        info!(
            file = filename.as_deref().unwrap_or("<unnamed>"),
            mime = %mime,
            size = data.len(),
            "extracting uploaded document"
        );

        let text = extract_text(&data, &mime)?;
        return Ok(Json(ExtractResponse { text }));
    }

    Err(AppError::Validation(
        "multipart upload contains no file field".to_string(),
    ))
}

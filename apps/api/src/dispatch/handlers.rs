//! Axum route handler for the mail dispatch boundary.

use axum::http::StatusCode;
use axum::{extract::State, Json};
use serde::Serialize;

use crate::compose::busy::Action;
use crate::dispatch::{DispatchError, EmailRequest};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub simulated: bool,
}

/// POST /api/v1/send
///
/// The dispatch boundary: one bulk send per call. Every outcome comes back as
/// a `{success, ...}` result object so the caller can always branch on
/// `success` — validation failures as 400, transport failures with the
/// transport's error text, successes annotated with simulation status.
pub async fn handle_send(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<(StatusCode, Json<SendEmailResponse>), AppError> {
    let _busy = state.busy.acquire(Action::Sending)?;

    let response = match state.mailer.send_email(&request).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SendEmailResponse {
                success: true,
                message: Some(outcome.message),
                error: None,
                simulated: outcome.simulated,
            }),
        ),
        Err(DispatchError::Validation(msg)) => (
            StatusCode::BAD_REQUEST,
            Json(SendEmailResponse {
                success: false,
                message: None,
                error: Some(msg),
                simulated: false,
            }),
        ),
        Err(DispatchError::Transport(msg)) => (
            StatusCode::OK,
            Json(SendEmailResponse {
                success: false,
                message: None,
                error: Some(msg),
                simulated: false,
            }),
        ),
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::compose::busy::BusyFlags;
    use crate::dispatch::Mailer;
    use crate::llm_client::LlmClient;
    use crate::stats::StatsStore;

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        AppState {
            llm: LlmClient::new(None),
            mailer: Arc::new(Mailer::Simulated),
            stats: Arc::new(StatsStore::load(dir.path().join("stats.json"))),
            busy: Arc::new(BusyFlags::default()),
        }
    }

    fn request(to: Vec<&str>) -> EmailRequest {
        EmailRequest {
            to: to.into_iter().map(String::from).collect(),
            subject: "Application".to_string(),
            html: "<p>hello</p>".to_string(),
            attachment: None,
        }
    }

    #[tokio::test]
    async fn test_validation_failure_keeps_the_result_object_shape() {
        let dir = tempfile::tempdir().unwrap();
        let (status, Json(body)) =
            handle_send(State(test_state(&dir)), Json(request(vec!["nope"])))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(body.error.unwrap().contains("nope"));
        assert!(body.message.is_none());
    }

    #[tokio::test]
    async fn test_zero_recipients_also_gets_a_result_object() {
        let dir = tempfile::tempdir().unwrap();
        let (status, Json(body)) = handle_send(State(test_state(&dir)), Json(request(vec![])))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(body.error.is_some());
    }

    #[tokio::test]
    async fn test_simulated_success_returns_ok_result_object() {
        let dir = tempfile::tempdir().unwrap();
        let (status, Json(body)) =
            handle_send(State(test_state(&dir)), Json(request(vec!["a@b.co"])))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert!(body.simulated);
    }
}

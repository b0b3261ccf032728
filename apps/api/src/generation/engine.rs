//! The three generation operations: improve a draft, write a cover letter,
//! and draft a full personalized application.

use serde::{Deserialize, Serialize};

use crate::dispatch::is_valid_email;
use crate::errors::AppError;
use crate::generation::prompts::{
    APPLICATION_PROMPT_TEMPLATE, APPLICATION_SYSTEM, COVER_LETTER_PROMPT_TEMPLATE,
    COVER_LETTER_SYSTEM, IMPROVE_PROMPT_TEMPLATE, IMPROVE_SYSTEM,
};
use crate::llm_client::{LlmClient, LlmError};

/// Maximum CV length submitted to the model. Longer CVs are cut here and
/// marked, to stay within the provider's input limits.
pub const CV_MAX_CHARS: usize = 100_000;
/// Marker appended to a truncated CV so the model knows text is missing.
pub const CV_TRUNCATION_MARKER: &str = "\n[CV truncated]";

/// Default tone for cover letters when the caller does not pick one.
pub const DEFAULT_TONE: &str = "neutral";

const NONE_PROVIDED: &str = "(none provided)";

#[derive(Debug, Deserialize)]
struct ImprovedDraft {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CoverLetter {
    letter: String,
}

/// Structured output of the personalized application operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub subject: String,
    pub message: String,
}

/// Rewrites a draft message, fixing grammar and tone in the same language.
pub async fn improve_draft(draft_message: &str, llm: &LlmClient) -> Result<String, AppError> {
    if draft_message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let prompt = IMPROVE_PROMPT_TEMPLATE.replace("{draft_message}", draft_message);
    let out: ImprovedDraft = llm.call_json(&prompt, IMPROVE_SYSTEM).await?;

    require_text("message", out.message)
}

/// Writes a cover letter from a CV and job description.
/// Tone defaults to "neutral" when absent.
pub async fn generate_cover_letter(
    cv: &str,
    job_description: &str,
    tone: Option<&str>,
    additional_instructions: Option<&str>,
    llm: &LlmClient,
) -> Result<String, AppError> {
    if cv.trim().is_empty() {
        return Err(AppError::EmptyCv);
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let prompt = cover_letter_prompt(cv, job_description, tone, additional_instructions);
    let out: CoverLetter = llm.call_json(&prompt, COVER_LETTER_SYSTEM).await?;

    require_text("letter", out.letter)
}

/// Drafts a complete application email (subject + body) personalized to the
/// recipient. The model infers the employer from the recipient's email domain.
pub async fn generate_personalized_application(
    recipient_email: &str,
    cv: &str,
    job_description: Option<&str>,
    personal_notes: Option<&str>,
    llm: &LlmClient,
) -> Result<ApplicationDraft, AppError> {
    if !is_valid_email(recipient_email) {
        return Err(AppError::Validation(format!(
            "invalid recipient address: {recipient_email}"
        )));
    }
    if cv.trim().is_empty() {
        return Err(AppError::EmptyCv);
    }

    let prompt = application_prompt(recipient_email, cv, job_description, personal_notes);
    let draft: ApplicationDraft = llm.call_json(&prompt, APPLICATION_SYSTEM).await?;

    if draft.subject.trim().is_empty() || draft.message.trim().is_empty() {
        return Err(LlmError::InvalidModelOutput(
            "subject and message must both be non-empty".to_string(),
        )
        .into());
    }

    Ok(draft)
}

fn cover_letter_prompt(
    cv: &str,
    job_description: &str,
    tone: Option<&str>,
    additional_instructions: Option<&str>,
) -> String {
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{tone}", tone.unwrap_or(DEFAULT_TONE))
        .replace(
            "{additional_instructions}",
            non_empty_or(additional_instructions, NONE_PROVIDED),
        )
        .replace("{cv_text}", &truncate_cv(cv))
        .replace("{job_description}", job_description)
}

fn application_prompt(
    recipient_email: &str,
    cv: &str,
    job_description: Option<&str>,
    personal_notes: Option<&str>,
) -> String {
    APPLICATION_PROMPT_TEMPLATE
        .replace("{recipient_email}", recipient_email)
        .replace("{cv_text}", &truncate_cv(cv))
        .replace(
            "{job_description}",
            non_empty_or(job_description, NONE_PROVIDED),
        )
        .replace("{personal_notes}", non_empty_or(personal_notes, NONE_PROVIDED))
}

/// Truncates a CV to `CV_MAX_CHARS` characters, appending the marker.
/// Counts characters, not bytes, so the cut never lands inside a code point.
fn truncate_cv(cv: &str) -> String {
    match cv.char_indices().nth(CV_MAX_CHARS) {
        Some((byte_idx, _)) => {
            let mut out = cv[..byte_idx].to_string();
            out.push_str(CV_TRUNCATION_MARKER);
            out
        }
        None => cv.to_string(),
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

fn require_text(field: &str, value: String) -> Result<String, AppError> {
    if value.trim().is_empty() {
        return Err(LlmError::InvalidModelOutput(format!("{field} must be non-empty")).into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_cv_is_not_truncated() {
        let cv = "ten years of Rust";
        assert_eq!(truncate_cv(cv), cv);
    }

    #[test]
    fn test_cv_at_exactly_max_chars_is_untouched() {
        let cv = "x".repeat(CV_MAX_CHARS);
        assert_eq!(truncate_cv(&cv), cv);
    }

    #[test]
    fn test_long_cv_truncates_to_max_plus_marker() {
        let cv = "y".repeat(150_000);
        let out = truncate_cv(&cv);
        assert!(out.ends_with(CV_TRUNCATION_MARKER));
        assert_eq!(out.len(), CV_MAX_CHARS + CV_TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // Multi-byte chars: the cut must count chars, not bytes
        let cv = "é".repeat(CV_MAX_CHARS + 10);
        let out = truncate_cv(&cv);
        assert!(out.ends_with(CV_TRUNCATION_MARKER));
        let body = &out[..out.len() - CV_TRUNCATION_MARKER.len()];
        assert_eq!(body.chars().count(), CV_MAX_CHARS);
    }

    #[test]
    fn test_application_prompt_substitutes_all_placeholders() {
        let prompt = application_prompt(
            "jobs@acme.example",
            "CV BODY",
            Some("JD BODY"),
            Some("NOTES BODY"),
        );
        for leftover in ["{recipient_email}", "{cv_text}", "{job_description}", "{personal_notes}"]
        {
            assert!(!prompt.contains(leftover), "unsubstituted {leftover}");
        }
        assert!(prompt.contains("jobs@acme.example"));
        assert!(prompt.contains("CV BODY"));
        assert!(prompt.contains("JD BODY"));
        assert!(prompt.contains("NOTES BODY"));
    }

    #[test]
    fn test_application_prompt_marks_absent_optionals() {
        let prompt = application_prompt("jobs@acme.example", "CV BODY", None, None);
        assert!(prompt.contains("(none provided)"));
    }

    #[test]
    fn test_cover_letter_prompt_defaults_tone_to_neutral() {
        let prompt = cover_letter_prompt("CV BODY", "JD BODY", None, None);
        assert!(prompt.contains("TONE: neutral"));
    }

    #[test]
    fn test_cover_letter_prompt_uses_explicit_tone() {
        let prompt = cover_letter_prompt("CV BODY", "JD BODY", Some("enthusiastic"), None);
        assert!(prompt.contains("TONE: enthusiastic"));
    }

    #[tokio::test]
    async fn test_improve_rejects_empty_message_before_any_call() {
        let llm = crate::llm_client::LlmClient::new(None);
        let err = improve_draft("   ", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_application_rejects_empty_cv_before_any_call() {
        let llm = crate::llm_client::LlmClient::new(None);
        let err = generate_personalized_application("jobs@acme.example", "", None, None, &llm)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyCv));
    }

    #[tokio::test]
    async fn test_application_rejects_invalid_recipient_before_any_call() {
        let llm = crate::llm_client::LlmClient::new(None);
        let err = generate_personalized_application("not-an-address", "CV", None, None, &llm)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

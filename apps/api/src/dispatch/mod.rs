//! Bulk Email Dispatcher — validates a fully formed message and hands it to
//! the SMTP transport in one call, or simulates the send when no transport
//! credentials are configured.

pub mod handlers;
mod smtp;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Transport(String),
}

/// An attachment as it arrives on the wire: base64 content plus metadata.
/// Decoded to bytes only at send time, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAttachment {
    pub filename: String,
    pub mime_type: String,
    /// Base64-encoded file content.
    pub content: String,
}

/// One outbound bulk message. The full recipient array rides on a single
/// transport call; there is no per-recipient loop and no partial success.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailRequest {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub attachment: Option<EmailAttachment>,
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub message: String,
    /// True when no transport credentials were configured and the send was
    /// validated and logged but never left the process.
    pub simulated: bool,
}

/// The mail transport boundary. Live when SMTP credentials are configured,
/// otherwise a simulation that exercises validation without network I/O.
pub enum Mailer {
    Live(smtp::SmtpMailer),
    Simulated,
}

impl Mailer {
    pub fn from_config(smtp: Option<&SmtpConfig>) -> anyhow::Result<Self> {
        match smtp {
            Some(config) => Ok(Mailer::Live(smtp::SmtpMailer::new(config)?)),
            None => Ok(Mailer::Simulated),
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, Mailer::Simulated)
    }

    /// Validates and dispatches one bulk email. Validation failures block the
    /// send before any transport work; transport failures come back as
    /// `DispatchError::Transport` carrying the transport's error text.
    pub async fn send_email(&self, request: &EmailRequest) -> Result<SendOutcome, DispatchError> {
        let attachment_bytes = validate(request)?;

        match self {
            Mailer::Simulated => {
                info!(
                    recipients = ?request.to,
                    subject = %request.subject,
                    "simulation mode: no SMTP credentials configured, not sending"
                );
                Ok(SendOutcome {
                    message: format!(
                        "Simulated send to {} recipient(s); no email was delivered",
                        request.to.len()
                    ),
                    simulated: true,
                })
            }
            Mailer::Live(mailer) => {
                let attachment = match (attachment_bytes, &request.attachment) {
                    (Some(bytes), Some(meta)) => Some((bytes, meta)),
                    _ => None,
                };
                mailer.send(request, attachment).await?;
                info!(
                    recipients = request.to.len(),
                    subject = %request.subject,
                    "email dispatched"
                );
                Ok(SendOutcome {
                    message: format!("Email sent to {} recipient(s)", request.to.len()),
                    simulated: false,
                })
            }
        }
    }
}

/// Structural validation, run before any transport work. Returns the decoded
/// attachment bytes so live mode does not decode twice.
fn validate(request: &EmailRequest) -> Result<Option<Vec<u8>>, DispatchError> {
    if request.to.is_empty() {
        return Err(DispatchError::Validation(
            "at least one recipient is required".to_string(),
        ));
    }
    for addr in &request.to {
        if !is_valid_email(addr) {
            return Err(DispatchError::Validation(format!(
                "invalid recipient address: {addr}"
            )));
        }
    }
    if request.subject.trim().is_empty() {
        return Err(DispatchError::Validation(
            "subject cannot be empty".to_string(),
        ));
    }
    if request.html.trim().is_empty() {
        return Err(DispatchError::Validation(
            "message body cannot be empty".to_string(),
        ));
    }

    let Some(attachment) = &request.attachment else {
        return Ok(None);
    };

    if attachment.filename.trim().is_empty() {
        return Err(DispatchError::Validation(
            "attachment filename cannot be empty".to_string(),
        ));
    }
    if attachment.mime_type.trim().is_empty() {
        return Err(DispatchError::Validation(
            "attachment mime_type cannot be empty".to_string(),
        ));
    }
    let bytes = BASE64.decode(&attachment.content).map_err(|e| {
        DispatchError::Validation(format!("attachment content is not valid base64: {e}"))
    })?;

    Ok(Some(bytes))
}

/// Syntactic email address check: one `@`, non-empty local part, dotted
/// domain, no whitespace. Deliverability is the transport's problem.
pub fn is_valid_email(addr: &str) -> bool {
    if addr.contains(char::is_whitespace) || addr.matches('@').count() != 1 {
        return false;
    }
    let Some((local, domain)) = addr.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Escapes HTML metacharacters in user-entered text. Mandatory before the
/// text is embedded in an HTML body — user input must never become markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Converts user-entered plain text to an HTML body: escape first, then
/// newlines become `<br>`.
pub fn text_to_html(text: &str) -> String {
    escape_html(text).replace("\r\n", "<br>").replace('\n', "<br>")
}

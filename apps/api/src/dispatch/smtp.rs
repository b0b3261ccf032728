//! Live SMTP transport via lettre (STARTTLS relay).

use anyhow::Context;
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{DispatchError, EmailAttachment, EmailRequest};
use crate::config::SmtpConfig;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .context("failed to create SMTP transport")?
            .port(config.port)
            .credentials(creds)
            .build();

        let from: Mailbox = config
            .from
            .parse()
            .context("SMTP_FROM is not a valid mailbox")?;

        Ok(Self { transport, from })
    }

    /// Builds and sends exactly one message addressed to the full recipient
    /// array. All-or-nothing: either the transport accepts the message for
    /// every recipient or the whole dispatch fails.
    pub async fn send(
        &self,
        request: &EmailRequest,
        attachment: Option<(Vec<u8>, &EmailAttachment)>,
    ) -> Result<(), DispatchError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(request.subject.as_str());

        for addr in &request.to {
            let mailbox: Mailbox = addr
                .parse()
                .map_err(|_| DispatchError::Validation(format!("invalid recipient address: {addr}")))?;
            builder = builder.to(mailbox);
        }

        let html_part = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(request.html.clone());

        let message = match attachment {
            Some((bytes, meta)) => {
                let content_type = ContentType::parse(&meta.mime_type).map_err(|_| {
                    DispatchError::Validation(format!(
                        "attachment mime_type is not a valid content type: {}",
                        meta.mime_type
                    ))
                })?;
                let file_part = Attachment::new(meta.filename.clone()).body(bytes, content_type);
                builder.multipart(MultiPart::mixed().singlepart(html_part).singlepart(file_part))
            }
            None => builder.singlepart(html_part),
        }
        .map_err(|e| DispatchError::Transport(format!("failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        Ok(())
    }
}

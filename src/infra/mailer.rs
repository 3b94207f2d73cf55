//! Customer email delivery.
//!
//! Uses the SMTP relay when configured. Otherwise emails are logged,
//! which keeps local development free of credentials.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{SmtpSettings, BRAND_NAME, SMTP_IMPLICIT_TLS_PORT};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an HTML email
    async fn send(&self, to: &str, subject: &str, html: String) -> AppResult<()>;
}

/// SMTP mailer: implicit TLS on port 465, STARTTLS otherwise.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> AppResult<Self> {
        let builder = if settings.port == SMTP_IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .map_err(|e| AppError::internal(format!("Invalid SMTP relay {}: {e}", settings.host)))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.user.clone(), settings.pass.clone()))
            .build();

        let address: Address = settings
            .sender
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid SENDER_EMAIL: {e}")))?;

        Ok(Self {
            transport,
            from: Mailbox::new(Some(BRAND_NAME.to_string()), address),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html: String) -> AppResult<()> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| AppError::bad_request(format!("Destinatario inválido: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| AppError::internal(format!("Failed to build email: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::upstream(format!("SMTP delivery failed: {e}")))?;

        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

/// Development mailer that only logs.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html: String) -> AppResult<()> {
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            to,
            subject,
            html
        );
        Ok(())
    }
}

//! SMTP submission over implicit TLS.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::Error as SmtpError;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use voxmail_core::config::MailConfig;
use voxmail_core::VoxmailError;
use voxmail_intent::{ConversationError, MailTransport};

use crate::validate::is_valid_email;

/// Errors from mail submission.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("login failed, check your app password")]
    Auth,
    #[error("message could not be built: {0}")]
    Build(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<MailError> for VoxmailError {
    fn from(err: MailError) -> Self {
        VoxmailError::Mail(err.to_string())
    }
}

impl From<SmtpError> for MailError {
    fn from(err: SmtpError) -> Self {
        // Map 535-style rejections to the login message the user can act on.
        if err.is_permanent() && err.to_string().contains("535") {
            MailError::Auth
        } else {
            MailError::Transport(err.to_string())
        }
    }
}

/// Mail submission over an authenticated SMTPS relay (implicit TLS).
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Build a mailer from configuration and a resolved password.
    ///
    /// The configured `from_address` doubles as the SMTP username, matching
    /// how app-password submission relays authenticate.
    pub fn new(config: &MailConfig, password: String) -> Result<Self, MailError> {
        if !is_valid_email(&config.from_address) {
            return Err(MailError::InvalidAddress(config.from_address.clone()));
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(config.from_address.clone(), password))
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }

    async fn submit(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        if !is_valid_email(to) {
            return Err(MailError::InvalidAddress(to.to_string()));
        }

        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| MailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(message).await?;
        info!(to, "Message accepted by relay");
        Ok(())
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ConversationError> {
        self.submit(to, subject, body).await.map_err(|e| {
            warn!(error = %e, "Send failed");
            match e {
                MailError::InvalidAddress(addr) => ConversationError::InvalidRecipient(addr),
                other => ConversationError::Send(other.to_string()),
            }
        })
    }
}

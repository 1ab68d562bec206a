use std::future::Future;

use clampsite_models::email_address::EmailAddress;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Send a single plain text email. Implementations must not retry.
    fn send(&self, email: Email) -> impl Future<Output = Result<EmailReceipt, EmailSendError>> + Send;
}

/// An outbound email. The sender identity is part of the email service
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddress,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<EmailAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt {
    /// Identifier assigned by the email provider, if its answer carried one.
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    /// The provider answered with a non-success status.
    #[error("Email provider rejected the email ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The provider could not be reached or did not answer in time.
    #[error("Failed to reach email provider")]
    Transport(#[source] anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: Result<EmailReceipt, EmailSendError>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

use std::future::Future;

use clampsite_models::contact::{ContactConfigError, ContactSubmission};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Relay a validated submission to the configured recipient. Exactly one
    /// email is sent per successful call, nothing is stored or retried.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;

    /// Whether the relay is configured well enough to attempt delivery.
    fn is_available(&self) -> bool;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error(transparent)]
    Misconfigured(#[from] ContactConfigError),
    #[error("{message}")]
    Rejected { message: String },
    #[error("Failed to reach email provider")]
    Unreachable,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_is_available(mut self, result: bool) -> Self {
        self.expect_is_available().return_const(result);
        self
    }
}

use std::sync::Arc;

use clampsite_core_contact_contracts::{ContactSendMessageError, ContactService};
use clampsite_di::Build;
use clampsite_email_contracts::{Email, EmailSendError, EmailService};
use clampsite_models::{
    contact::{ContactConfigError, ContactSubmission},
    email_address::EmailAddress,
};
use tracing::{error, info, warn};

const SUBJECT_PREFIX: &str = "[Contact]";
const FALLBACK_ERROR_MESSAGE: &str = "Failed to send message";

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Destination of relayed messages, or the reason the relay cannot be
    /// used in this deployment.
    pub recipient: Result<Arc<EmailAddress>, ContactConfigError>,
}

impl<EmailS> ContactService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(&self, submission: ContactSubmission) -> Result<(), ContactSendMessageError> {
        let recipient = self.config.recipient.as_ref().map_err(|&err| {
            warn!("Refusing contact message: {err}");
            err
        })?;

        let email = Email {
            recipient: (**recipient).clone(),
            subject: format!("{SUBJECT_PREFIX} {}", submission.subject),
            body: format!(
                "Name: {}\nEmail: {}\nSubject: {}\n\n{}\n",
                submission.name, submission.email, submission.subject, submission.message
            ),
            reply_to: Some(submission.email),
        };

        match self.email.send(email).await {
            Ok(receipt) => {
                info!(id = ?receipt.id, "Relayed contact message");
                Ok(())
            }
            Err(EmailSendError::Rejected { status, message }) => {
                error!(status, "Email provider rejected contact message: {message}");
                let message = if message.trim().is_empty() {
                    FALLBACK_ERROR_MESSAGE.into()
                } else {
                    message
                };
                Err(ContactSendMessageError::Rejected { message })
            }
            Err(EmailSendError::Transport(err)) => {
                error!("Failed to reach email provider: {err:#}");
                Err(ContactSendMessageError::Unreachable)
            }
            Err(EmailSendError::Other(err)) => Err(err.into()),
        }
    }

    fn is_available(&self) -> bool {
        self.config.recipient.is_ok()
    }
}

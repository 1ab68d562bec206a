use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clampsite_di::Build;
use clampsite_email_contracts::{Email, EmailReceipt, EmailSendError, EmailService};
use clampsite_models::email_address::{EmailAddress, EmailAddressWithName};
use clampsite_utils::Apply;
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::http::HttpClient;

mod http;

/// Sends emails through a transactional email HTTP API authenticated with a
/// bearer token (`POST {api_url}emails`).
#[derive(Debug, Clone, Build)]
pub struct EmailServiceImpl {
    config: EmailServiceConfig,
    #[state]
    http: HttpClient,
}

#[derive(Clone)]
pub struct EmailServiceConfig {
    /// Must end with a slash, `emails` is joined onto it.
    pub api_url: Arc<Url>,
    pub api_key: Arc<str>,
    pub from: Arc<EmailAddressWithName>,
    /// Request timeout, `None` leaves it to the http client.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for EmailServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailServiceConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"<redacted>")
            .field("from", &self.from)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<EmailReceipt, EmailSendError> {
        let url = self
            .config
            .api_url
            .join("emails")
            .context("Failed to build send email URL")?;

        let request = SendEmailRequest {
            from: self.config.from.to_string(),
            to: [email.recipient.as_str()],
            reply_to: email.reply_to.as_ref().map(EmailAddress::as_str),
            subject: &email.subject,
            text: &email.body,
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(&*self.config.api_key)
            .json(&request)
            .apply_map(self.config.timeout, RequestBuilder::timeout)
            .send()
            .await
            .map_err(|err| EmailSendError::Transport(err.into()))?;

        let status = response.status();
        if status.is_success() {
            // Accepted means sent, even if the body does not carry an id.
            let body = response.text().await.unwrap_or_default();
            let id = serde_json::from_str::<SendEmailResponse>(&body)
                .ok()
                .map(|response| response.id);
            if id.is_none() {
                warn!(%status, "Email provider accepted the email without returning an id");
            }
            return Ok(EmailReceipt { id });
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|err| err.message)
            .unwrap_or(body);

        Err(EmailSendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

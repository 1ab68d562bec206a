use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

/// Emails accepted by the fake provider, in the order they were sent.
#[derive(Debug, Clone, Default)]
pub struct Outbox(Arc<Mutex<Vec<SentEmail>>>);

impl Outbox {
    pub async fn emails(&self) -> Vec<SentEmail> {
        self.0.lock().await.clone()
    }

    async fn push(&self, email: SentEmail) {
        self.0.lock().await.push(email);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub id: String,
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
}

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting email api testing server on {host}:{port}");
    info!("Send endpoint: http://{host}:{port}{EMAILS_ROUTE}");
    info!("API key: {api_key:?}");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(api_key, Outbox::default()))
        .await
        .context("Failed to start HTTP server")
}

/// Build the router of the fake provider. Accepted emails are recorded in
/// `outbox` and can also be listed with `GET /emails`.
pub fn router(api_key: impl Into<Arc<str>>, outbox: Outbox) -> Router<()> {
    Router::new()
        .route(
            EMAILS_ROUTE,
            routing::post(send_email).get(list_emails),
        )
        .with_state(AppState {
            api_key: api_key.into(),
            outbox,
        })
}

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    outbox: Outbox,
}

#[derive(Deserialize)]
struct SendEmailRequest {
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: Recipients,
    #[serde(default, alias = "replyTo")]
    reply_to: Option<String>,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Default for Recipients {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<Recipients> for Vec<String> {
    fn from(value: Recipients) -> Self {
        match value {
            Recipients::One(to) => vec![to],
            Recipients::Many(to) => to,
        }
    }
}

#[derive(Serialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    status_code: u16,
    name: &'static str,
    message: &'static str,
}

fn error(status: StatusCode, name: &'static str, message: &'static str) -> Response {
    let response = ErrorResponse {
        status_code: status.as_u16(),
        name,
        message,
    };
    (status, Json(response)).into_response()
}

async fn send_email(state: State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    else {
        return error(
            StatusCode::UNAUTHORIZED,
            "missing_api_key",
            "Missing API key in the authorization header",
        );
    };

    if token != &*state.api_key {
        return error(StatusCode::FORBIDDEN, "validation_error", "API key is invalid");
    }

    let Ok(request) = serde_json::from_slice::<SendEmailRequest>(&body) else {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Invalid request body",
        );
    };

    let to = Vec::<String>::from(request.to);
    if request.from.trim().is_empty() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "missing_required_field",
            "Missing `from` field.",
        );
    }
    if to.is_empty() || to.iter().any(|to| !to.contains('@')) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Invalid `to` field.",
        );
    }
    if request.subject.trim().is_empty() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "missing_required_field",
            "Missing `subject` field.",
        );
    }

    let id = Uuid::new_v4().to_string();
    info!(%id, subject = %request.subject, "accepted email");

    state
        .outbox
        .push(SentEmail {
            id: id.clone(),
            from: request.from,
            to,
            reply_to: request.reply_to,
            subject: request.subject,
            text: request.text,
        })
        .await;

    Json(SendEmailResponse { id }).into_response()
}

async fn list_emails(state: State<AppState>) -> Json<Vec<SentEmail>> {
    Json(state.outbox.emails().await)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    async fn spawn(outbox: Outbox) -> String {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router("re_test", outbox))
                .await
                .unwrap()
        });
        format!("http://{addr}{EMAILS_ROUTE}")
    }

    #[tokio::test]
    async fn accepts_email() {
        let outbox = Outbox::default();
        let url = spawn(outbox.clone()).await;

        let response = reqwest::Client::new()
            .post(&url)
            .bearer_auth("re_test")
            .json(&json!({
                "from": "me@example.com",
                "to": "you@example.com",
                "replyTo": "them@example.com",
                "subject": "Hi",
                "text": "Hello",
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let id = response.json::<serde_json::Value>().await.unwrap()["id"]
            .as_str()
            .unwrap()
            .to_owned();

        let emails = outbox.emails().await;
        assert_eq!(
            emails,
            [SentEmail {
                id,
                from: "me@example.com".into(),
                to: vec!["you@example.com".into()],
                reply_to: Some("them@example.com".into()),
                subject: "Hi".into(),
                text: "Hello".into(),
            }]
        );
    }

    #[tokio::test]
    async fn rejects_invalid_api_key() {
        let outbox = Outbox::default();
        let url = spawn(outbox.clone()).await;

        let response = reqwest::Client::new()
            .post(&url)
            .bearer_auth("wrong")
            .json(&json!({"from": "me@example.com", "to": ["you@example.com"], "subject": "Hi"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::FORBIDDEN);
        let body = response.json::<serde_json::Value>().await.unwrap();
        assert_eq!(body["message"], "API key is invalid");
        assert!(outbox.emails().await.is_empty());
    }

    #[tokio::test]
    async fn rejects_missing_subject() {
        let url = spawn(Outbox::default()).await;

        let response = reqwest::Client::new()
            .post(&url)
            .bearer_auth("re_test")
            .json(&json!({"from": "me@example.com", "to": ["you@example.com"]}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    }
}

use std::{sync::Arc, time::Duration};

use clampsite_di::{provider, Provides};
use clampsite_email_contracts::{Email, EmailReceipt, EmailSendError, EmailService};
use clampsite_email_impl::{EmailServiceConfig, EmailServiceImpl};
use clampsite_testing::resend::{self, Outbox};
use clampsite_utils::assert_matches;
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use url::Url;

const API_KEY: &str = "re_test";

#[tokio::test]
async fn send_email() {
    let client = setup(API_KEY).await;

    let receipt = client
        .email
        .send(Email {
            recipient: "team@example.com".parse().unwrap(),
            subject: "[Contact] The Subject".into(),
            body: "Hello World!".into(),
            reply_to: Some("replyto@example.com".parse().unwrap()),
        })
        .await
        .unwrap();

    let mut emails = client.outbox.emails().await;
    assert_eq!(emails.len(), 1);
    let mail = emails.pop().unwrap();
    assert_eq!(receipt.id, Some(mail.id));
    assert!(mail.from.ends_with("<onboarding@example.com>"), "{}", mail.from);
    assert_eq!(mail.to, ["team@example.com"]);
    assert_eq!(mail.reply_to.as_deref(), Some("replyto@example.com"));
    assert_eq!(mail.subject, "[Contact] The Subject");
    assert_eq!(mail.text, "Hello World!");
}

#[tokio::test]
async fn send_email_without_reply_to() {
    let client = setup(API_KEY).await;

    client
        .email
        .send(Email {
            recipient: "team@example.com".parse().unwrap(),
            subject: "Test".into(),
            body: "Test".into(),
            reply_to: None,
        })
        .await
        .unwrap();

    let emails = client.outbox.emails().await;
    assert_eq!(emails[0].reply_to, None);
}

#[tokio::test]
async fn rejected_by_provider() {
    let client = setup("not-the-api-key").await;

    let result = client
        .email
        .send(Email {
            recipient: "team@example.com".parse().unwrap(),
            subject: "Test".into(),
            body: "Test".into(),
            reply_to: None,
        })
        .await;

    assert_matches!(
        result,
        Err(EmailSendError::Rejected { status: 403, message }) if message == "API key is invalid"
    );
    assert!(client.outbox.emails().await.is_empty());
}

#[tokio::test]
async fn accepted_without_id() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let api_url = format!("http://{}/", listener.local_addr().unwrap())
        .parse()
        .unwrap();
    let router = axum::Router::new().route(resend::EMAILS_ROUTE, axum::routing::post(|| async { "" }));
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    let email = make_sut(api_url, API_KEY);

    let receipt = email
        .send(Email {
            recipient: "team@example.com".parse().unwrap(),
            subject: "Test".into(),
            body: "Test".into(),
            reply_to: None,
        })
        .await
        .unwrap();

    assert_eq!(receipt, EmailReceipt { id: None });
}

#[tokio::test]
async fn provider_unreachable() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let api_url = format!("http://{}/", listener.local_addr().unwrap())
        .parse()
        .unwrap();
    drop(listener);

    let email = make_sut(api_url, API_KEY);

    let result = email
        .send(Email {
            recipient: "team@example.com".parse().unwrap(),
            subject: "Test".into(),
            body: "Test".into(),
            reply_to: None,
        })
        .await;

    assert_matches!(result, Err(EmailSendError::Transport(_)));
}

struct TestClient {
    email: EmailServiceImpl,
    outbox: Outbox,
}

async fn setup(api_key: &str) -> TestClient {
    let outbox = Outbox::default();
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let api_url = format!("http://{}/", listener.local_addr().unwrap())
        .parse()
        .unwrap();

    let router = resend::router(API_KEY, outbox.clone());
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    TestClient {
        email: make_sut(api_url, api_key),
        outbox,
    }
}

fn make_sut(api_url: Url, api_key: &str) -> EmailServiceImpl {
    provider! {
        Provider { email_service_config: EmailServiceConfig, }
    }

    let mut provider = Provider {
        _cache: Default::default(),
        email_service_config: EmailServiceConfig {
            api_url: api_url.into(),
            api_key: api_key.into(),
            from: Arc::new(
                "Leak Detector Contact <onboarding@example.com>"
                    .parse()
                    .unwrap(),
            ),
            timeout: Some(Duration::from_secs(5)),
        },
    };

    provider.provide()
}

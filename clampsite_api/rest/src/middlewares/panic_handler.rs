use std::panic::AssertUnwindSafe;

use anyhow::anyhow;
use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures::FutureExt;

use crate::routes::internal_server_error;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            internal_server_error(anyhow!("request handler panicked: {reason}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::routing;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::tests::spawn;

    async fn panicking() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn panic_becomes_internal_server_error() {
        // Arrange
        let router = Router::new()
            .route("/panic", routing::get(panicking))
            .route("/ok", routing::get(|| async { "ok" }));
        let base = spawn(add(router)).await;
        let client = reqwest::Client::new();

        // Act
        let panicked = client.get(format!("{base}/panic")).send().await.unwrap();
        let after = client.get(format!("{base}/ok")).send().await.unwrap();

        // Assert
        assert_eq!(panicked.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            panicked.json::<serde_json::Value>().await.unwrap(),
            json!({"error": "Unexpected error"})
        );
        assert_eq!(after.status(), reqwest::StatusCode::OK);
    }
}

//! Assign each request a unique ID

use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    Router,
};
use base64::{display::Base64Display, engine::general_purpose::URL_SAFE_NO_PAD};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::new();
    request.extensions_mut().insert(request_id);
    let response = next.run(request).await;
    ([(REQUEST_ID_HEADER, request_id.to_string())], response).into_response()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub Uuid);

impl RequestId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Base64Display::new(self.0.as_bytes(), &URL_SAFE_NO_PAD).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use axum::routing;

    use super::*;
    use crate::tests::spawn;

    #[test]
    fn display_is_compact() {
        let id = RequestId(Uuid::nil());
        assert_eq!(id.to_string(), "AAAAAAAAAAAAAAAAAAAAAA");
    }

    #[tokio::test]
    async fn every_response_carries_a_fresh_id() {
        let router = Router::new().route("/", routing::get(|| async { "ok" }));
        let base = spawn(add(router)).await;
        let client = reqwest::Client::new();

        let mut ids = HashSet::new();
        for _ in 0..3 {
            let response = client.get(&base).send().await.unwrap();
            let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
            assert_eq!(id.len(), 22);
            ids.insert(id.to_owned());
        }

        assert_eq!(ids.len(), 3);
    }
}

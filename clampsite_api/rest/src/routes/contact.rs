use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use clampsite_core_contact_contracts::{ContactSendMessageError, ContactService};
use clampsite_models::contact::ContactSubmission;
use tracing::debug;

use super::{error, internal_server_error};
use crate::models::contact::{ApiContactResponse, DecodedSubmission};

pub const CONTACT_ROUTE: &str = "/api/contact";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            CONTACT_ROUTE,
            routing::post(send_message).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
        }
        Err(rejection) => return error(rejection.status(), rejection.body_text()),
    };

    let decoded = DecodedSubmission::decode(&body);
    if decoded == DecodedSubmission::Malformed {
        debug!("malformed contact submission");
    }

    let submission = match ContactSubmission::try_from(decoded.into_raw()) {
        Ok(submission) => submission,
        Err(err) => return error(StatusCode::BAD_REQUEST, err),
    };

    match service.send_message(submission).await {
        Ok(()) => Json(ApiContactResponse { ok: true }).into_response(),
        Err(ContactSendMessageError::Misconfigured(err)) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, err)
        }
        Err(err @ (ContactSendMessageError::Rejected { .. } | ContactSendMessageError::Unreachable)) => {
            error(StatusCode::BAD_GATEWAY, err)
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

async fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed (use POST)")
}

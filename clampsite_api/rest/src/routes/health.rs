use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use clampsite_core_contact_contracts::ContactService;
use serde::Serialize;

pub fn router(contact: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(contact)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    contact: bool,
}

async fn health(contact: State<Arc<impl ContactService>>) -> Response {
    let contact = contact.is_available();

    let status = if contact {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse {
        http: true,
        contact,
    };

    (status, Json(response)).into_response()
}

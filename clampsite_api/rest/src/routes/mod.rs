use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiError;

pub mod contact;
pub mod health;
pub mod search;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected error")
}

fn error(code: StatusCode, message: impl Display) -> Response {
    let error = message.to_string();
    (code, Json(ApiError { error })).into_response()
}

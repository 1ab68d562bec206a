use serde::Serialize;

pub mod contact;
pub mod search;

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

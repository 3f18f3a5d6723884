//! Success body helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

pub const CREATED: &str = "Channel created successfully";
pub const UPDATED: &str = "Channel updated successfully";
pub const DELETED: &str = "Channel deleted successfully";

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

pub fn message(text: &str) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: text.to_string(),
        }),
    )
}

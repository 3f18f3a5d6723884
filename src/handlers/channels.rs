//! Channel handlers: list, create, update, delete.

use crate::error::{AppError, ErrorBody, ValidationBody};
use crate::model::{Channel, ChannelInput};
use crate::response::{self, MessageBody};
use crate::service::ChannelService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

/// Path ids that are not integers cannot name a channel.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::channel_not_found())
}

/// A body that is not JSON carries no fields, so it fails the required rules with 422.
/// Bodies that could not be read at all (e.g. over the size limit) are a bad request.
fn body_or_empty(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::BytesRejection(rejection)) => Err(AppError::BadRequest(rejection.body_text())),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "non-JSON request body treated as empty");
            Ok(Value::Object(Map::new()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/channels",
    responses((status = 200, description = "All channels in insertion order", body = [Channel]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Channel>>, AppError> {
    let channels = ChannelService::list(state.store.as_ref()).await?;
    Ok(Json(channels))
}

#[utoipa::path(
    post,
    path = "/channels",
    request_body = ChannelInput,
    responses(
        (status = 200, description = "Channel created", body = MessageBody),
        (status = 400, description = "Duplicate name or non-positive clients count", body = ErrorBody),
        (status = 422, description = "Missing or malformed fields", body = ValidationBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_or_empty(body)?;
    ChannelService::create(state.store.as_ref(), &body).await?;
    Ok(response::message(response::CREATED))
}

#[utoipa::path(
    put,
    path = "/channels/{id}",
    params(("id" = i64, Path, description = "Channel id")),
    request_body = ChannelInput,
    responses(
        (status = 200, description = "Channel updated", body = MessageBody),
        (status = 400, description = "Duplicate name or non-positive clients count", body = ErrorBody),
        (status = 404, description = "Channel not found", body = ErrorBody),
        (status = 422, description = "Missing or malformed fields", body = ValidationBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = body_or_empty(body)?;
    ChannelService::update(state.store.as_ref(), id, &body).await?;
    Ok(response::message(response::UPDATED))
}

#[utoipa::path(
    delete,
    path = "/channels/{id}",
    params(("id" = i64, Path, description = "Channel id")),
    responses(
        (status = 200, description = "Channel deleted", body = MessageBody),
        (status = 404, description = "Channel not found", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    ChannelService::delete(state.store.as_ref(), id).await?;
    Ok(response::message(response::DELETED))
}

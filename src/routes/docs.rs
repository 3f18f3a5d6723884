//! OpenAPI document for the channel resource.

use crate::error::{ErrorBody, ValidationBody};
use crate::handlers::channels;
use crate::model::{Channel, ChannelInput};
use crate::response::MessageBody;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "channels-api", description = "Channel records with unique names and positive client counts"),
    paths(channels::list, channels::create, channels::update, channels::delete),
    components(schemas(Channel, ChannelInput, MessageBody, ErrorBody, ValidationBody))
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /openapi.json
pub fn docs_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi))
}

//! Router assembly: common routes, API docs and the channel resource.

mod channels;
mod common;
mod docs;

pub use channels::channel_routes;
pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc};

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router. Channel routes are nested under `api_prefix` when it is non-empty.
pub fn app(state: AppState, api_prefix: &str, body_limit: usize) -> Router {
    let channels = channel_routes(state.clone());
    let api = if api_prefix.is_empty() {
        channels
    } else {
        Router::new().nest(api_prefix, channels)
    };
    Router::new()
        .merge(common_routes(state))
        .merge(docs_routes())
        .merge(api)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}

//! Channel resource routes.

use crate::handlers::channels::{create, delete as delete_handler, list, update};
use crate::state::AppState;
use axum::{routing::get, routing::put, Router};

pub fn channel_routes(state: AppState) -> Router {
    Router::new()
        .route("/channels", get(list).post(create))
        .route("/channels/:id", put(update).delete(delete_handler))
        .with_state(state)
}

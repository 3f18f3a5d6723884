//! Shared application state for all routes.

use crate::store::ChannelStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChannelStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ChannelStore>) -> Self {
        AppState { store }
    }
}

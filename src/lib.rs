//! Channels API: CRUD over channel records with unique names and positive client counts.

pub mod case;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError, FieldErrors};
pub use migration::{ensure_channels_table, ensure_database_exists};
pub use model::{Channel, ChannelInput};
pub use routes::{app, channel_routes, common_routes};
pub use seed::seed_channels;
pub use service::{ChannelService, RequestValidator};
pub use settings::{Settings, StoreKind};
pub use state::AppState;
pub use store::{ChannelStore, MemoryChannelStore, PgChannelStore};

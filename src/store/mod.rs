//! Storage port for channels and its adapters.

mod memory;
mod postgres;

pub use memory::MemoryChannelStore;
pub use postgres::PgChannelStore;

use crate::error::AppError;
use crate::model::{Channel, ChannelInput};
use async_trait::async_trait;

/// Row-level persistence for channels. Implementations keep `name` unique and
/// `clients_count` positive even when callers skip the pre-checks.
#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// All channels, ascending by id.
    async fn list(&self) -> Result<Vec<Channel>, AppError>;

    async fn find(&self, id: i64) -> Result<Option<Channel>, AppError>;

    /// Whether a channel other than `except` already uses `name`.
    async fn name_taken(&self, name: &str, except: Option<i64>) -> Result<bool, AppError>;

    async fn insert(&self, input: &ChannelInput) -> Result<Channel, AppError>;

    /// Overwrite name and clients count. `None` when the id no longer exists.
    async fn update(&self, id: i64, input: &ChannelInput) -> Result<Option<Channel>, AppError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

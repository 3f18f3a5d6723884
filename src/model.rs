//! Channel entity and its validated write payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted channel. `id` is assigned by the store and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub clients_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a client may set on create and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInput {
    #[schema(example = "Google")]
    pub name: String,
    #[schema(example = 725)]
    pub clients_count: i64,
}

impl ChannelInput {
    pub fn new(name: impl Into<String>, clients_count: i64) -> Self {
        ChannelInput {
            name: name.into(),
            clients_count,
        }
    }
}

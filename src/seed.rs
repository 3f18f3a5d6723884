//! Sample data for a fresh database.

use crate::error::AppError;
use crate::model::ChannelInput;
use crate::store::ChannelStore;

pub const SAMPLE_CHANNELS: &[(&str, i64)] = &[
    ("Google", 725),
    ("Facebook", 225),
    ("Instagram", 15),
    ("Twitter", 30),
    ("LinkedIn", 45),
];

/// Insert the sample channels, skipping names that already exist. Returns how many were inserted.
pub async fn seed_channels(store: &dyn ChannelStore) -> Result<usize, AppError> {
    let mut inserted = 0;
    for (name, clients_count) in SAMPLE_CHANNELS {
        if store.name_taken(name, None).await? {
            tracing::debug!(name, "seed channel already present");
            continue;
        }
        store.insert(&ChannelInput::new(*name, *clients_count)).await?;
        inserted += 1;
    }
    tracing::info!(inserted, "seeded channels");
    Ok(inserted)
}

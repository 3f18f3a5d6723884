//! List, create, update and delete channels. Structural validation runs first,
//! then the uniqueness and positivity rules, then the write.

use crate::error::AppError;
use crate::model::{Channel, ChannelInput};
use crate::service::RequestValidator;
use crate::store::ChannelStore;
use serde_json::Value;

pub struct ChannelService;

impl ChannelService {
    pub async fn list(store: &dyn ChannelStore) -> Result<Vec<Channel>, AppError> {
        store.list().await
    }

    /// Resolve a channel by id or fail with the structured not-found error.
    pub async fn find(store: &dyn ChannelStore, id: i64) -> Result<Channel, AppError> {
        store
            .find(id)
            .await?
            .ok_or_else(AppError::channel_not_found)
    }

    pub async fn create(store: &dyn ChannelStore, body: &Value) -> Result<Channel, AppError> {
        let input = RequestValidator::channel_input(body)?;
        Self::check_rules(store, &input, None).await?;
        let channel = store.insert(&input).await?;
        tracing::info!(id = channel.id, name = %channel.name, "channel created");
        Ok(channel)
    }

    /// The id is resolved before the body is validated.
    pub async fn update(store: &dyn ChannelStore, id: i64, body: &Value) -> Result<Channel, AppError> {
        let existing = Self::find(store, id).await?;
        let input = RequestValidator::channel_input(body)?;
        Self::check_rules(store, &input, Some(existing.id)).await?;
        let channel = store
            .update(existing.id, &input)
            .await?
            .ok_or_else(AppError::channel_not_found)?;
        tracing::info!(id = channel.id, name = %channel.name, "channel updated");
        Ok(channel)
    }

    pub async fn delete(store: &dyn ChannelStore, id: i64) -> Result<(), AppError> {
        let existing = Self::find(store, id).await?;
        if !store.delete(existing.id).await? {
            return Err(AppError::channel_not_found());
        }
        tracing::info!(id = existing.id, name = %existing.name, "channel deleted");
        Ok(())
    }

    async fn check_rules(
        store: &dyn ChannelStore,
        input: &ChannelInput,
        except: Option<i64>,
    ) -> Result<(), AppError> {
        if store.name_taken(&input.name, except).await? {
            tracing::warn!(name = %input.name, "duplicate channel name rejected");
            return Err(AppError::duplicate_name());
        }
        if input.clients_count <= 0 {
            tracing::warn!(clients_count = input.clients_count, "non-positive clients count rejected");
            return Err(AppError::non_positive_clients());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryChannelStore;
    use serde_json::json;

    #[tokio::test]
    async fn duplicate_name_wins_over_bad_count() {
        let store = MemoryChannelStore::new();
        ChannelService::create(&store, &json!({"name": "Google", "clientsCount": 725}))
            .await
            .unwrap();
        let err = ChannelService::create(&store, &json!({"name": "Google", "clientsCount": -1}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn validation_wins_over_duplicate_name() {
        let store = MemoryChannelStore::new();
        ChannelService::create(&store, &json!({"name": "Google", "clientsCount": 725}))
            .await
            .unwrap();
        let err = ChannelService::create(&store, &json!({"name": "Google"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_zero_and_negative_counts() {
        let store = MemoryChannelStore::new();
        for count in [0, -1] {
            let err = ChannelService::create(&store, &json!({"name": "X", "clientsCount": count}))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidValue(_)));
        }
        assert!(ChannelService::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_resolves_id_before_validating() {
        let store = MemoryChannelStore::new();
        let err = ChannelService::update(&store, 42, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_keeps_id_and_allows_own_name() {
        let store = MemoryChannelStore::new();
        let created = ChannelService::create(&store, &json!({"name": "Google", "clientsCount": 725}))
            .await
            .unwrap();
        let updated = ChannelService::update(&store, created.id, &json!({"name": "Google", "clientsCount": 1}))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.clients_count, 1);
    }

    #[tokio::test]
    async fn update_rejects_name_of_other_channel() {
        let store = MemoryChannelStore::new();
        let google = ChannelService::create(&store, &json!({"name": "Google", "clientsCount": 725}))
            .await
            .unwrap();
        ChannelService::create(&store, &json!({"name": "newGoogle", "clientsCount": 325}))
            .await
            .unwrap();
        let err = ChannelService::update(&store, google.id, &json!({"name": "newGoogle", "clientsCount": 325}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        let unchanged = ChannelService::find(&store, google.id).await.unwrap();
        assert_eq!(unchanged.name, "Google");
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = MemoryChannelStore::new();
        let a = ChannelService::create(&store, &json!({"name": "A", "clientsCount": 1}))
            .await
            .unwrap();
        ChannelService::create(&store, &json!({"name": "B", "clientsCount": 2}))
            .await
            .unwrap();
        ChannelService::delete(&store, a.id).await.unwrap();
        let names: Vec<String> = ChannelService::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["B".to_string()]);

        let err = ChannelService::delete(&store, a.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

//! In-process channel store. Used when no database is configured and in tests.

use super::ChannelStore;
use crate::error::AppError;
use crate::model::{Channel, ChannelInput};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Channel>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryChannelStore {
    inner: RwLock<Inner>,
}

impl MemoryChannelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|c| c.name == name && Some(c.id) != except)
    }

    fn check_write(&self, input: &ChannelInput, except: Option<i64>) -> Result<(), AppError> {
        if self.name_taken(&input.name, except) {
            return Err(AppError::duplicate_name());
        }
        if input.clients_count <= 0 {
            return Err(AppError::non_positive_clients());
        }
        Ok(())
    }
}

#[async_trait]
impl ChannelStore for MemoryChannelStore {
    async fn list(&self) -> Result<Vec<Channel>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Channel>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn name_taken(&self, name: &str, except: Option<i64>) -> Result<bool, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.name_taken(name, except))
    }

    async fn insert(&self, input: &ChannelInput) -> Result<Channel, AppError> {
        let mut inner = self.inner.write().await;
        inner.check_write(input, None)?;
        inner.last_id += 1;
        let now = Utc::now();
        let channel = Channel {
            id: inner.last_id,
            name: input.name.clone(),
            clients_count: input.clients_count,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(channel.id, channel.clone());
        Ok(channel)
    }

    async fn update(&self, id: i64, input: &ChannelInput) -> Result<Option<Channel>, AppError> {
        let mut inner = self.inner.write().await;
        if !inner.rows.contains_key(&id) {
            return Ok(None);
        }
        inner.check_write(input, Some(id))?;
        let Some(channel) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        channel.name = input.name.clone();
        channel.clients_count = input.clients_count;
        channel.updated_at = Utc::now();
        Ok(Some(channel.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let store = MemoryChannelStore::new();
        let a = store.insert(&ChannelInput::new("A", 1)).await.unwrap();
        let b = store.insert(&ChannelInput::new("B", 2)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        assert!(store.delete(b.id).await.unwrap());
        let c = store.insert(&ChannelInput::new("C", 3)).await.unwrap();
        assert_eq!(c.id, 3);

        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn enforces_unique_name_on_write() {
        let store = MemoryChannelStore::new();
        store.insert(&ChannelInput::new("Google", 725)).await.unwrap();
        let err = store.insert(&ChannelInput::new("Google", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.list().await.unwrap().len(), 1);

        // case-sensitive
        store.insert(&ChannelInput::new("google", 1)).await.unwrap();
    }

    #[tokio::test]
    async fn enforces_positive_clients_count() {
        let store = MemoryChannelStore::new();
        let err = store.insert(&ChannelInput::new("A", 0)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidValue(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_may_keep_own_name() {
        let store = MemoryChannelStore::new();
        let a = store.insert(&ChannelInput::new("A", 1)).await.unwrap();
        store.insert(&ChannelInput::new("B", 1)).await.unwrap();

        let updated = store.update(a.id, &ChannelInput::new("A", 9)).await.unwrap().unwrap();
        assert_eq!(updated.clients_count, 9);
        assert_eq!(updated.created_at, a.created_at);

        let err = store.update(a.id, &ChannelInput::new("B", 9)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(store.name_taken("B", Some(a.id)).await.unwrap());
        assert!(!store.name_taken("A", Some(a.id)).await.unwrap());
    }

    #[tokio::test]
    async fn missing_rows() {
        let store = MemoryChannelStore::new();
        assert!(store.find(7).await.unwrap().is_none());
        assert!(store.update(7, &ChannelInput::new("A", 1)).await.unwrap().is_none());
        assert!(!store.delete(7).await.unwrap());
    }
}

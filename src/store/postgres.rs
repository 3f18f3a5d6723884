//! PostgreSQL channel store. Relies on the `channels` table from `migration::ensure_channels_table`.

use super::ChannelStore;
use crate::error::AppError;
use crate::model::{Channel, ChannelInput};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const COLUMNS: &str = "id, name, clients_count, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ChannelRow {
    id: i64,
    name: String,
    clients_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ChannelRow> for Channel {
    fn from(r: ChannelRow) -> Self {
        Channel {
            id: r.id,
            name: r.name,
            clients_count: r.clients_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgChannelStore {
    pool: PgPool,
}

impl PgChannelStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Constraint violations are the backstop for the service's pre-checks.
fn write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return AppError::duplicate_name();
        }
        if db.is_check_violation() {
            return AppError::non_positive_clients();
        }
    }
    AppError::Db(e)
}

#[async_trait]
impl ChannelStore for PgChannelStore {
    async fn list(&self) -> Result<Vec<Channel>, AppError> {
        let sql = format!("SELECT {} FROM channels ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, ChannelRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Channel::from).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Channel>, AppError> {
        let sql = format!("SELECT {} FROM channels WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, ChannelRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Channel::from))
    }

    async fn name_taken(&self, name: &str, except: Option<i64>) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM channels WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2))";
        tracing::debug!(sql = %sql, name, ?except, "query");
        let (taken,): (bool,) = sqlx::query_as(sql)
            .bind(name)
            .bind(except)
            .fetch_one(&self.pool)
            .await?;
        Ok(taken)
    }

    async fn insert(&self, input: &ChannelInput) -> Result<Channel, AppError> {
        let sql = format!(
            "INSERT INTO channels (name, clients_count) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, name = %input.name, clients_count = input.clients_count, "query");
        let row = sqlx::query_as::<_, ChannelRow>(&sql)
            .bind(&input.name)
            .bind(input.clients_count)
            .fetch_one(&self.pool)
            .await
            .map_err(write_error)?;
        Ok(row.into())
    }

    async fn update(&self, id: i64, input: &ChannelInput) -> Result<Option<Channel>, AppError> {
        let sql = format!(
            "UPDATE channels SET name = $1, clients_count = $2, updated_at = NOW() WHERE id = $3 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id, name = %input.name, clients_count = input.clients_count, "query");
        let row = sqlx::query_as::<_, ChannelRow>(&sql)
            .bind(&input.name)
            .bind(input.clients_count)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(write_error)?;
        Ok(row.map(Channel::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        tracing::debug!(id, "delete channel row");
        let result = sqlx::query("DELETE FROM channels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

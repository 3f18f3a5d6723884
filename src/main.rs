//! Server binary: loads settings, prepares the store, mounts the routes.

use channels_api::{
    app, ensure_channels_table, ensure_database_exists, seed_channels, AppState, ChannelStore,
    ConfigError, MemoryChannelStore, PgChannelStore, Settings, StoreKind,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("channels_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store = build_store(&settings).await?;
    if settings.seed {
        seed_channels(store.as_ref()).await?;
    }

    let state = AppState::new(store);
    let router = app(state, &settings.api_prefix, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(
        store = ?settings.store,
        prefix = %settings.api_prefix,
        "listening on {}",
        listener.local_addr()?
    );
    axum::serve(listener, router).await?;
    Ok(())
}

async fn build_store(settings: &Settings) -> Result<Arc<dyn ChannelStore>, Box<dyn std::error::Error>> {
    match settings.store {
        StoreKind::Memory => {
            tracing::warn!("no database configured; channels are kept in memory");
            Ok(Arc::new(MemoryChannelStore::new()))
        }
        StoreKind::Postgres => {
            let database_url = settings
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.db_max_connections)
                .connect(database_url)
                .await?;
            ensure_channels_table(&pool).await?;
            Ok(Arc::new(PgChannelStore::new(pool)))
        }
    }
}

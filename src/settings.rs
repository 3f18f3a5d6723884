//! Runtime settings from environment variables (a `.env` file is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Which `ChannelStore` adapter backs the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(ConfigError::Invalid {
                key: "CHANNELS_STORE",
                reason: format!("{} (expected postgres or memory)", other),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: Option<String>,
    pub store: StoreKind,
    pub bind_addr: SocketAddr,
    /// Mount point for the channel routes, e.g. "/api". Empty mounts at the root.
    pub api_prefix: String,
    pub db_max_connections: u32,
    pub body_limit_bytes: usize,
    /// Insert the sample channels at startup.
    pub seed: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL");
        let store = match get("CHANNELS_STORE") {
            Some(s) => s.parse()?,
            None if database_url.is_some() => StoreKind::Postgres,
            None => StoreKind::Memory,
        };
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_addr.parse().map_err(|e| ConfigError::Invalid {
            key: "BIND_ADDR",
            reason: format!("{}: {}", bind_addr, e),
        })?;

        let api_prefix = get("API_PREFIX").unwrap_or_default();
        let api_prefix = api_prefix.trim_end_matches('/').to_string();
        if !api_prefix.is_empty() && !api_prefix.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "API_PREFIX",
                reason: format!("{} must start with '/'", api_prefix),
            });
        }

        Ok(Settings {
            database_url,
            store,
            bind_addr,
            api_prefix,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT)?,
            seed: parse_flag("CHANNELS_SEED", get("CHANNELS_SEED"))?,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
            key,
            reason: format!("{} is not a valid number", v),
        }),
    }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_lowercase).as_deref() {
        None | Some("0") | Some("false") | Some("no") => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some(other) => Err(ConfigError::Invalid {
            key,
            reason: format!("{} (expected true or false)", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_to_memory_without_database() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.store, StoreKind::Memory);
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.api_prefix, "");
        assert_eq!(s.db_max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(!s.seed);
    }

    #[test]
    fn database_url_selects_postgres() {
        let s = settings(&[("DATABASE_URL", "postgres://localhost/channels"), ("CHANNELS_SEED", "true")]).unwrap();
        assert_eq!(s.store, StoreKind::Postgres);
        assert!(s.seed);
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = settings(&[("CHANNELS_STORE", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn prefix_is_normalized_and_checked() {
        assert_eq!(settings(&[("API_PREFIX", "/api/")]).unwrap().api_prefix, "/api");
        assert!(settings(&[("API_PREFIX", "api")]).is_err());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(settings(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(settings(&[("DB_MAX_CONNECTIONS", "lots")]).is_err());
        assert!(settings(&[("CHANNELS_SEED", "maybe")]).is_err());
        assert!(settings(&[("CHANNELS_STORE", "redis")]).is_err());
    }
}

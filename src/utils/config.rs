//! Environment-driven configuration.
//!
//! `.env` is loaded first (if present), then process environment variables are
//! read. Missing store settings do not fail loading; they surface as a
//! `Configuration` error from [`StoreConfig::provider`] so diagnostics can still
//! report them.

use crate::db::DatabaseProvider;
use crate::types::{AppError, Result};
use std::env;
use std::time::Duration;

pub const STORE_URL_VAR: &str = "AGENT_STORE_URL";
pub const STORE_KEY_VAR: &str = "AGENT_STORE_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub invoker: InvokerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InvokerConfig {
    /// Unset means the HTTP client default (no timeout)
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env_var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: parse_var("PORT")?.unwrap_or(3000),
            },
            store: StoreConfig {
                url: env_var(STORE_URL_VAR),
                auth_token: env_var(STORE_KEY_VAR),
            },
            invoker: InvokerConfig {
                timeout: parse_var::<u64>("AGENT_TEST_TIMEOUT_SECS")?.map(Duration::from_secs),
            },
        })
    }

    /// Configuration for an in-memory store, used by tests and demos.
    pub fn in_memory() -> Self {
        Config {
            server: ServerConfig::default(),
            store: StoreConfig::in_memory(),
            invoker: InvokerConfig::default(),
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self {
            url: Some(":memory:".to_string()),
            auth_token: None,
        }
    }

    /// Resolve the backing provider, failing with `Configuration` when settings are missing.
    pub fn provider(&self) -> Result<DatabaseProvider> {
        let url = self.url.as_deref().ok_or_else(|| {
            AppError::Configuration(format!("{} is not set", STORE_URL_VAR))
        })?;

        DatabaseProvider::from_url(url, self.auth_token.as_deref()).map_err(|e| match e {
            AppError::Configuration(msg) if self.auth_token.is_none() => {
                AppError::Configuration(format!("{} ({} is not set)", msg, STORE_KEY_VAR))
            }
            other => other,
        })
    }

    /// Store URL truncated for display, or `NOT SET`.
    pub fn masked_url(&self) -> String {
        mask(self.url.as_deref(), 30)
    }

    /// Store key truncated for display, or `NOT SET`.
    pub fn masked_key(&self) -> String {
        mask(self.auth_token.as_deref(), 20)
    }
}

fn mask(value: Option<&str>, visible: usize) -> String {
    match value {
        Some(v) => format!("{}...", v.chars().take(visible).collect::<String>()),
        None => "NOT SET".to_string(),
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    env_var(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                AppError::Configuration(format!("Invalid value for {}: {}", name, e))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_configuration_error() {
        let store = StoreConfig::default();
        let err = store.provider().unwrap_err();
        assert!(matches!(err, AppError::Configuration(ref msg) if msg.contains(STORE_URL_VAR)));
    }

    #[test]
    fn test_missing_key_for_remote_mentions_variable() {
        let store = StoreConfig {
            url: Some("libsql://agents.turso.io".to_string()),
            auth_token: None,
        };
        let err = store.provider().unwrap_err();
        assert!(matches!(err, AppError::Configuration(ref msg) if msg.contains(STORE_KEY_VAR)));
    }

    #[test]
    fn test_in_memory_provider() {
        assert_eq!(
            StoreConfig::in_memory().provider().unwrap(),
            DatabaseProvider::Memory
        );
    }

    #[test]
    fn test_masking() {
        let store = StoreConfig {
            url: Some("libsql://a-very-long-database-name.turso.io".to_string()),
            auth_token: Some("eyJhbGciOiJFZERTQSIsInR5cCI6IkpXVCJ9".to_string()),
        };
        assert_eq!(store.masked_url(), "libsql://a-very-long-database-...");
        assert_eq!(store.masked_key(), "eyJhbGciOiJFZERTQSIs...");

        let empty = StoreConfig::default();
        assert_eq!(empty.masked_url(), "NOT SET");
        assert_eq!(empty.masked_key(), "NOT SET");
    }
}

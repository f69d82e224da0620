//! Agent repository abstraction
//!
//! This module provides the `AgentRepository` trait, the single access layer the
//! rest of the application uses to reach the agent store, and `DatabaseProvider`,
//! which selects the libSQL backing at deploy time (remote Turso, local SQLite
//! file, or in-memory).
//!
//! # Example
//!
//! ```rust,ignore
//! use friday::db::DatabaseProvider;
//!
//! // In-memory database (tests, demos)
//! let repo = DatabaseProvider::Memory.create_client().await?;
//!
//! // Remote Turso
//! let repo = DatabaseProvider::from_url("libsql://agents.turso.io", Some(token))?
//!     .create_client()
//!     .await?;
//! ```

use crate::types::{Agent, AgentPatch, AppError, CreateAgentInput, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Pick a provider from a store URL.
    ///
    /// `:memory:` and `file:<path>` open local databases and ignore the key.
    /// Any other URL is treated as remote and requires a non-empty key.
    pub fn from_url(url: &str, auth_token: Option<&str>) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::Configuration("Store URL is empty".to_string()));
        }

        if url == ":memory:" {
            return Ok(DatabaseProvider::Memory);
        }

        if let Some(path) = url.strip_prefix("file:") {
            if path.is_empty() {
                return Err(AppError::Configuration(
                    "Store URL 'file:' is missing a path".to_string(),
                ));
            }
            return Ok(DatabaseProvider::SQLite {
                path: path.to_string(),
            });
        }

        match auth_token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => Ok(DatabaseProvider::Turso {
                url: url.to_string(),
                auth_token: token.to_string(),
            }),
            None => Err(AppError::Configuration(format!(
                "Remote store '{}' requires an access key",
                url
            ))),
        }
    }

    /// Create a repository backed by this provider
    pub async fn create_client(&self) -> Result<Arc<dyn AgentRepository>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::turso::TursoClient::new_memory().await?;
                Ok(Arc::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::turso::TursoClient::new_local(path).await?;
                Ok(Arc::new(client))
            }
            DatabaseProvider::Turso { url, auth_token } => {
                let client =
                    super::turso::TursoClient::new_remote(url.clone(), auth_token.clone()).await?;
                Ok(Arc::new(client))
            }
        }
    }
}

impl fmt::Display for DatabaseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseProvider::Memory => write!(f, "in-memory"),
            DatabaseProvider::SQLite { path } => write!(f, "sqlite ({})", path),
            DatabaseProvider::Turso { url, .. } => write!(f, "turso ({})", url),
        }
    }
}

/// Access layer over the agent store.
///
/// Every method is a single round trip. Mutations are single statements; there
/// are no multi-row transactions.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// All agents, newest first
    async fn list_all(&self) -> Result<Vec<Agent>>;

    /// At most `limit` agents, newest first
    async fn list_recent(&self, limit: usize) -> Result<Vec<Agent>> {
        let mut agents = self.list_all().await?;
        agents.truncate(limit);
        Ok(agents)
    }

    /// Agents that are both public and enabled, newest first
    async fn list_public_enabled(&self) -> Result<Vec<Agent>>;

    /// Fails with `NotFound` if no agent has this id
    async fn get_by_id(&self, id: &str) -> Result<Agent>;

    /// Insert a new agent. The store assigns id and timestamps.
    ///
    /// Fails with `InvalidInput` on missing/malformed fields and `Conflict`
    /// when the slug is already taken.
    async fn create(&self, input: CreateAgentInput) -> Result<Agent>;

    /// Overwrite only the fields present in `patch`
    async fn update(&self, id: &str, patch: AgentPatch) -> Result<Agent>;

    /// Permanently remove an agent. Fails with `NotFound` if it does not exist.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Slugs of every stored agent
    async fn slugs(&self) -> Result<Vec<String>>;

    /// Column names of the agents table
    async fn schema_columns(&self) -> Result<Vec<String>>;
}

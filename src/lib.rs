//! # Friday Agent Dashboard
//!
//! Administration service for the registry of Friday agents: external HTTP
//! endpoints described by a name, slug, icon, use cases, trigger keywords,
//! tool declarations and enabled/public flags.
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a server** - Run `friday-dashboard serve` to expose the JSON API
//! 2. **As a library** - Use the repository, service and invoker directly
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use friday::{AgentService, DatabaseProvider};
//!
//! #[tokio::main]
//! async fn main() -> friday::Result<()> {
//!     let repository = DatabaseProvider::Memory.create_client().await?;
//!     let service = AgentService::new(repository);
//!
//!     friday::agents::seed_sample_agents(service.repository().as_ref()).await?;
//!     service.refresh().await?;
//!
//!     for agent in service.search("code") {
//!         println!("{} ({})", agent.name, agent.slug);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `swagger-ui` | Serve interactive API docs at `/swagger-ui/` |
//!
//! ## Modules
//!
//! - [`agents`] - Snapshot service, test invoker and seeding
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line interface and terminal output
//! - [`db`] - Agent repository (libsql: memory, file, remote) and diagnostics
//! - [`server`] - HTTP server bootstrap
//! - [`types`] - Agent records, inputs and error handling
//! - [`utils`] - Environment configuration

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Agent state service, endpoint tester and seeder.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Agent storage.
pub mod db;
/// HTTP server startup and shutdown.
pub mod server;
/// Core types (agents, inputs, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{AgentService, AgentTestInvoker, TestOutcome};
pub use db::{AgentRepository, DatabaseProvider, TursoClient};
pub use types::{Agent, AgentIcon, AgentPatch, AppError, CreateAgentInput, Result};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Environment configuration
    pub config: Arc<Config>,
    /// Agent store
    pub repository: Arc<dyn AgentRepository>,
    /// HTTP client used for dashboard test calls
    pub invoker: Arc<AgentTestInvoker>,
}

impl AppState {
    /// Build state around an existing repository.
    pub fn new(
        config: Config,
        repository: Arc<dyn AgentRepository>,
        invoker: AgentTestInvoker,
    ) -> Self {
        Self {
            config: Arc::new(config),
            repository,
            invoker: Arc::new(invoker),
        }
    }
}

//! Configuration utilities.

/// Environment-driven configuration (store connection, server address, invoker).
pub mod config;

pub use config::{Config, InvokerConfig, ServerConfig, StoreConfig};

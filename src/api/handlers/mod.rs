//! API request handlers.

/// Agent CRUD and test handlers.
pub mod agents;
/// Store diagnostics handler.
pub mod debug;
/// Sample agent seeding handler.
pub mod seed;

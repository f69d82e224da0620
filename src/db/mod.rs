//! Agent store access.
//!
//! This module provides:
//! - **`AgentRepository`**: the access layer every other component talks to
//! - **`TursoClient`**: the libSQL implementation (remote Turso, SQLite file, in-memory)
//! - **Diagnostics**: connectivity and schema reporting for the debug surfaces
//!
//! The backing database is selected at deploy time through [`DatabaseProvider`].

pub mod diagnostics;
pub mod traits;
pub mod turso;

// Re-exports
pub use diagnostics::{run_diagnostics, DiagnosticStatus, DiagnosticsReport};
pub use traits::{AgentRepository, DatabaseProvider};
pub use turso::TursoClient;

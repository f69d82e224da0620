//! Agent management on top of the repository.
//!
//! - [`service`] - snapshot-holding state controller used by presentation surfaces
//! - [`invoker`] - manual test calls against an agent's endpoint
//! - [`seed`] - sample agent seeding

/// Client-side agent state controller.
pub mod service;

/// Agent endpoint test calls.
pub mod invoker;

/// Sample agent seeding.
pub mod seed;

pub use invoker::{AgentTestInvoker, TestOutcome};
pub use seed::{sample_agents, seed_sample_agents, SeedReport};
pub use service::{AgentService, AgentStats, Snapshot};

//! Client-side agent state controller
//!
//! `AgentService` owns the in-memory snapshot of all agents for a session. The
//! snapshot is only ever replaced wholesale by [`AgentService::replace_snapshot`],
//! so readers see either the previous full collection or the new one.
//!
//! ## Refresh ordering
//!
//! Every `refresh()` takes a sequence number before it queries the store. A
//! response is installed only if its sequence is newer than the installed
//! snapshot's, so a slow, stale response can never overwrite a newer one.
//! A failed refresh records its error with the same sequence; installing a
//! snapshot only clears errors from older refreshes.
//!
//! ## Mutations
//!
//! `create`, `edit`, `toggle` and `remove` each issue one repository call and
//! then refetch everything. The snapshot is never patched locally.

use crate::db::AgentRepository;
use crate::types::{Agent, AgentPatch, CreateAgentInput, Result};
use arc_swap::ArcSwap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// An immutable view of every agent as of one successful store read.
#[derive(Debug, Default)]
pub struct Snapshot {
    agents: Vec<Agent>,
    sequence: u64,
}

impl Snapshot {
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Sequence number of the refresh that produced this snapshot (0 = never loaded)
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn stats(&self) -> AgentStats {
        AgentStats {
            total: self.agents.len(),
            enabled: self.agents.iter().filter(|a| a.enabled).count(),
            public: self.agents.iter().filter(|a| a.is_public).count(),
        }
    }
}

/// Counts derived from a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgentStats {
    pub total: usize,
    pub enabled: usize,
    pub public: usize,
}

pub struct AgentService {
    repository: Arc<dyn AgentRepository>,
    snapshot: ArcSwap<Snapshot>,
    next_sequence: AtomicU64,
    /// Serializes snapshot installation
    writer: Mutex<()>,
    /// Last refresh failure and the sequence of the refresh that hit it
    error: RwLock<Option<(u64, String)>>,
}

impl AgentService {
    /// Create a service with an empty snapshot. Call [`refresh`](Self::refresh) to load.
    pub fn new(repository: Arc<dyn AgentRepository>) -> Self {
        Self {
            repository,
            snapshot: ArcSwap::from_pointee(Snapshot::default()),
            next_sequence: AtomicU64::new(0),
            writer: Mutex::new(()),
            error: RwLock::new(None),
        }
    }

    pub fn repository(&self) -> &Arc<dyn AgentRepository> {
        &self.repository
    }

    /// The currently installed snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    /// Reload every agent from the store.
    ///
    /// On failure the previous snapshot is kept and the error is recorded.
    pub async fn refresh(&self) -> Result<()> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;

        match self.repository.list_all().await {
            Ok(agents) => {
                self.replace_snapshot(sequence, agents);
                Ok(())
            }
            Err(e) => {
                self.record_error(sequence, e.to_string());
                Err(e)
            }
        }
    }

    /// Install `agents` as the snapshot if `sequence` is newer than the current one.
    ///
    /// Returns whether the snapshot was replaced. A replacement clears any
    /// error recorded by an older refresh.
    pub fn replace_snapshot(&self, sequence: u64, agents: Vec<Agent>) -> bool {
        let _guard = self.writer.lock();

        let current = self.snapshot.load().sequence;
        if sequence <= current {
            debug!(sequence, current, "Dropping stale agent snapshot");
            return false;
        }

        debug!(sequence, count = agents.len(), "Installing agent snapshot");
        self.snapshot.store(Arc::new(Snapshot { agents, sequence }));

        let mut error = self.error.write();
        if error.as_ref().is_some_and(|(failed, _)| *failed < sequence) {
            *error = None;
        }
        true
    }

    /// Keep the failure unless a newer snapshot or newer failure already landed.
    fn record_error(&self, sequence: u64, message: String) {
        let _guard = self.writer.lock();

        if sequence <= self.snapshot.load().sequence {
            debug!(sequence, "Ignoring failure from a superseded refresh");
            return;
        }

        let mut error = self.error.write();
        if error.as_ref().is_some_and(|(failed, _)| *failed > sequence) {
            return;
        }

        warn!(error = %message, sequence, "Agent refresh failed; keeping previous snapshot");
        *error = Some((sequence, message));
    }

    pub async fn create(&self, input: CreateAgentInput) -> Result<Agent> {
        let agent = self.repository.create(input).await?;
        self.refresh_after_mutation().await;
        Ok(agent)
    }

    pub async fn edit(&self, id: &str, patch: AgentPatch) -> Result<Agent> {
        let agent = self.repository.update(id, patch).await?;
        self.refresh_after_mutation().await;
        Ok(agent)
    }

    /// Flip `enabled`. The current value comes from the snapshot, or from the
    /// store when the agent has not been loaded yet.
    pub async fn toggle(&self, id: &str) -> Result<Agent> {
        let enabled = match self.get(id) {
            Some(agent) => agent.enabled,
            None => self.repository.get_by_id(id).await?.enabled,
        };

        let agent = self
            .repository
            .update(id, AgentPatch::enabled(!enabled))
            .await?;
        self.refresh_after_mutation().await;
        Ok(agent)
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    async fn refresh_after_mutation(&self) {
        // The mutation already succeeded; a failed reload only sets the error state.
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Refresh after mutation failed");
        }
    }

    pub fn get(&self, id: &str) -> Option<Agent> {
        self.snapshot
            .load()
            .agents
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    /// Case-insensitive substring search over name, description and slug.
    /// A blank query returns the whole snapshot.
    pub fn search(&self, query: &str) -> Vec<Agent> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.snapshot.load().agents.clone();
        }
        self.filter(|agent| agent.matches(&needle))
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<Agent>
    where
        F: Fn(&Agent) -> bool,
    {
        self.snapshot
            .load()
            .agents
            .iter()
            .filter(|agent| predicate(agent))
            .cloned()
            .collect()
    }

    /// Public and enabled agents from the snapshot
    pub fn listed(&self) -> Vec<Agent> {
        self.filter(Agent::is_listed)
    }

    pub fn stats(&self) -> AgentStats {
        self.snapshot.load().stats()
    }

    /// The last refresh error, if it has not been cleared since
    pub fn error(&self) -> Option<String> {
        self.error.read().as_ref().map(|(_, message)| message.clone())
    }

    pub fn clear_error(&self) {
        *self.error.write() = None;
    }
}

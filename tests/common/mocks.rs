//! Mock implementations for testing.
//!
//! An in-process [`AgentRepository`] that can be told to fail or to stall its
//! list calls, so service behaviour can be tested without a database.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use friday::db::AgentRepository;
use friday::types::{non_blank, Agent, AgentPatch, AppError, CreateAgentInput, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Mock agent store backed by a `Vec`.
///
/// `list_all` captures the rows when it is called, then waits for the next
/// queued delay before returning them. This lets a test make an older list
/// call finish after a newer one.
#[derive(Default)]
pub struct MockAgentRepository {
    agents: Mutex<Vec<Agent>>,
    fail_reads: AtomicBool,
    list_delays: Mutex<VecDeque<Duration>>,
    list_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl MockAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `agents` (kept in the given order).
    pub fn with_agents(agents: Vec<Agent>) -> Self {
        let repo = Self::default();
        *repo.agents.lock() = agents;
        repo
    }

    /// Make subsequent list calls fail with `StoreUnavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.fail_reads.store(failing, Ordering::SeqCst);
    }

    /// Delay the next list call by `delay`.
    pub fn delay_next_list(&self, delay: Duration) {
        self.list_delays.lock().push_back(delay);
    }

    /// Insert directly, bypassing validation.
    pub fn insert(&self, agent: Agent) {
        self.agents.lock().insert(0, agent);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<Agent> {
        self.agents.lock().clone()
    }

    fn check_available(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable("mock store is down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AgentRepository for MockAgentRepository {
    async fn list_all(&self) -> Result<Vec<Agent>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.check_available().map(|_| self.agents.lock().clone());

        let delay = self.list_delays.lock().pop_front();
        if let Some(delay) = delay.filter(|d| !d.is_zero()) {
            tokio::time::sleep(delay).await;
        }

        result
    }

    async fn list_public_enabled(&self) -> Result<Vec<Agent>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(Agent::is_listed)
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Agent> {
        self.check_available()?;
        self.agents
            .lock()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Agent {} not found", id)))
    }

    async fn create(&self, input: CreateAgentInput) -> Result<Agent> {
        let input = input.sanitize()?;
        let mut agents = self.agents.lock();
        if agents.iter().any(|a| a.slug == input.slug) {
            return Err(AppError::Conflict(format!(
                "Agent slug '{}' already exists",
                input.slug
            )));
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let agent = Agent {
            id: format!("mock-{}", n),
            name: input.name,
            slug: input.slug,
            url: input.url,
            description: input.description,
            icon: input.icon,
            use_cases: input.use_cases,
            trigger_keywords: input.trigger_keywords,
            tools: input.tools,
            enabled: input.enabled,
            is_public: input.is_public,
            version: input.version,
            author: input.author,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        agents.insert(0, agent.clone());
        Ok(agent)
    }

    async fn update(&self, id: &str, patch: AgentPatch) -> Result<Agent> {
        let patch = patch.sanitize()?;
        let mut agents = self.agents.lock();
        let agent = agents
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Agent {} not found", id)))?;

        if let Some(name) = patch.name {
            agent.name = name;
        }
        if let Some(slug) = patch.slug {
            agent.slug = slug;
        }
        if let Some(url) = patch.url {
            agent.url = url;
        }
        if let Some(description) = patch.description {
            agent.description = description;
        }
        if let Some(icon) = patch.icon {
            agent.icon = icon;
        }
        if let Some(use_cases) = patch.use_cases {
            agent.use_cases = use_cases;
        }
        if let Some(keywords) = patch.trigger_keywords {
            agent.trigger_keywords = keywords;
        }
        if let Some(tools) = patch.tools {
            agent.tools = tools;
        }
        if let Some(enabled) = patch.enabled {
            agent.enabled = enabled;
        }
        if let Some(is_public) = patch.is_public {
            agent.is_public = is_public;
        }
        if let Some(version) = patch.version {
            agent.version = non_blank(version);
        }
        if let Some(author) = patch.author {
            agent.author = non_blank(author);
        }
        agent.updated_at = Some(Utc::now());

        Ok(agent.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut agents = self.agents.lock();
        let before = agents.len();
        agents.retain(|a| a.id != id);
        if agents.len() == before {
            return Err(AppError::NotFound(format!("Agent {} not found", id)));
        }
        Ok(())
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        self.check_available()?;
        Ok(self.agents.lock().iter().map(|a| a.slug.clone()).collect())
    }

    async fn schema_columns(&self) -> Result<Vec<String>> {
        Ok(vec!["id".to_string(), "name".to_string(), "slug".to_string()])
    }
}

/// A stored agent with sensible defaults; `age_minutes` orders `created_at`.
pub fn agent(id: &str, name: &str, description: &str, age_minutes: i64) -> Agent {
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        slug: friday::types::slugify(name),
        url: format!("https://agents.example.com/{}", id),
        description: description.to_string(),
        icon: Default::default(),
        use_cases: vec![],
        trigger_keywords: vec![],
        tools: vec![],
        enabled: true,
        is_public: true,
        version: None,
        author: None,
        created_at: Some(Utc::now() - ChronoDuration::minutes(age_minutes)),
        updated_at: None,
    }
}

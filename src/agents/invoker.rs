//! Manual agent test calls.
//!
//! Sends `{ "command": ..., "context": "Test from dashboard" }` to an agent's
//! `url` and renders whatever comes back as text. Failures are rendered too;
//! nothing here returns an error to the caller.

use crate::types::{Agent, AppError, Result};
use crate::utils::config::InvokerConfig;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const TEST_CONTEXT: &str = "Test from dashboard";

#[derive(Debug, Serialize)]
struct TestEnvelope<'a> {
    command: &'a str,
    context: &'a str,
}

/// Result of a single test call
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome {
    /// The body parsed as JSON (any status)
    Json { status: u16, body: Value },
    /// The body was not JSON
    Text { status: u16, body: String },
    /// The request could not be completed
    Failed(String),
}

impl TestOutcome {
    pub fn render(&self) -> String {
        match self {
            TestOutcome::Json { body, .. } => serde_json::to_string_pretty(body)
                .unwrap_or_else(|e| format!("Error: {}", e)),
            TestOutcome::Text { status, body } if body.trim().is_empty() => {
                format!("Error: empty response (HTTP {})", status)
            }
            TestOutcome::Text { body, .. } => body.clone(),
            TestOutcome::Failed(message) => format!("Error: {}", message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentTestInvoker {
    http_client: reqwest::Client,
}

impl Default for AgentTestInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTestInvoker {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &InvokerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// POST the test envelope to `agent.url`.
    pub async fn run(&self, agent: &Agent, command: &str) -> TestOutcome {
        debug!(agent = %agent.slug, url = %agent.url, "Sending test command");

        let response = match self
            .http_client
            .post(&agent.url)
            .json(&TestEnvelope {
                command,
                context: TEST_CONTEXT,
            })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(agent = %agent.slug, error = %e, "Test request failed");
                return TestOutcome::Failed(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return TestOutcome::Failed(format!("Failed to read response: {}", e)),
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(body) => TestOutcome::Json { status, body },
            Err(_) => TestOutcome::Text { status, body: text },
        }
    }

    /// Run the test and render the outcome for display.
    pub async fn invoke(&self, agent: &Agent, command: &str) -> String {
        self.run(agent, command).await.render()
    }
}

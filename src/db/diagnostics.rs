//! Store connectivity and schema diagnostics.
//!
//! Used by `GET /api/debug` and `friday-dashboard debug`. Diagnostics never
//! fail: every problem is reported inside the [`DiagnosticsReport`].

use super::traits::AgentRepository;
use crate::types::Agent;
use crate::utils::config::StoreConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

const SAMPLE_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DiagnosticsReport {
    pub timestamp: DateTime<Utc>,
    pub env: EnvReport,
    pub status: DiagnosticStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents_query: Option<QueryCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_check: Option<SchemaCheck>,
}

/// Masked view of the connection settings
#[derive(Debug, Serialize, ToSchema)]
pub struct EnvReport {
    pub store_url: String,
    pub store_key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueryCheck {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub count: usize,
    pub data: Vec<AgentSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SchemaCheck {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub columns: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AgentSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub enabled: bool,
    pub is_public: bool,
}

impl From<&Agent> for AgentSummary {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            name: agent.name.clone(),
            slug: agent.slug.clone(),
            enabled: agent.enabled,
            is_public: agent.is_public,
        }
    }
}

/// Build a diagnostics report.
///
/// When `repository` is `None` a connection is opened from `store`. Nothing is
/// contacted when the configuration itself is incomplete.
pub async fn run_diagnostics(
    store: &StoreConfig,
    repository: Option<Arc<dyn AgentRepository>>,
) -> DiagnosticsReport {
    let mut report = DiagnosticsReport {
        timestamp: Utc::now(),
        env: EnvReport {
            store_url: store.masked_url(),
            store_key: store.masked_key(),
        },
        status: DiagnosticStatus::Error,
        error: None,
        agents_query: None,
        schema_check: None,
    };

    let provider = match store.provider() {
        Ok(provider) => provider,
        Err(e) => {
            warn!(error = %e, "Store configuration incomplete");
            report.error = Some(format!("Missing store configuration: {}", e));
            return report;
        }
    };

    let repository = match repository {
        Some(repository) => repository,
        None => match provider.create_client().await {
            Ok(repository) => repository,
            Err(e) => {
                warn!(error = %e, provider = %provider, "Store connection failed");
                report.error = Some(e.to_string());
                return report;
            }
        },
    };

    let agents_query = match repository.list_recent(SAMPLE_LIMIT).await {
        Ok(agents) => QueryCheck {
            success: true,
            error: None,
            count: agents.len(),
            data: agents.iter().map(AgentSummary::from).collect(),
        },
        Err(e) => QueryCheck {
            success: false,
            error: Some(e.to_string()),
            count: 0,
            data: Vec::new(),
        },
    };

    let schema_check = match repository.schema_columns().await {
        Ok(columns) => SchemaCheck {
            success: true,
            error: None,
            columns,
        },
        Err(e) => SchemaCheck {
            success: false,
            error: Some(e.to_string()),
            columns: Vec::new(),
        },
    };

    report.status = if agents_query.success {
        DiagnosticStatus::Ok
    } else {
        DiagnosticStatus::Error
    };
    report.agents_query = Some(agents_query);
    report.schema_check = Some(schema_check);

    report
}

//! Agent CRUD handlers
//!
//! Thin routes over the repository: one store round trip per request, no
//! server-side session state.

use crate::api::extract::{ApiJson, ApiQuery};
use crate::types::{Agent, AgentPatch, AppError, CreateAgentInput, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

// ============= Request/Response Types =============

/// Request to update an agent: the id plus any subset of fields
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAgentRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub patch: AgentPatch,
}

/// Query parameters for deleting an agent
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteAgentQuery {
    /// Id of the agent to delete
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteAgentResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TestAgentRequest {
    #[serde(default)]
    pub command: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TestAgentResponse {
    /// Pretty-printed JSON, raw text, or an `Error: ...` line
    pub result: String,
}

// ============= Handlers =============

/// List every agent, newest first.
#[utoipa::path(
    get,
    path = "/api/agents",
    responses(
        (status = 200, description = "All agents", body = Vec<Agent>),
        (status = 503, description = "Store unavailable")
    ),
    tag = "agents"
)]
pub async fn list_agents(State(state): State<AppState>) -> Result<Json<Vec<Agent>>> {
    let agents = state.repository.list_all().await?;
    Ok(Json(agents))
}

/// List agents that are public and enabled.
#[utoipa::path(
    get,
    path = "/api/agents/public",
    responses(
        (status = 200, description = "Public, enabled agents", body = Vec<Agent>)
    ),
    tag = "agents"
)]
pub async fn list_public_agents(State(state): State<AppState>) -> Result<Json<Vec<Agent>>> {
    let agents = state.repository.list_public_enabled().await?;
    Ok(Json(agents))
}

/// Get one agent by id.
#[utoipa::path(
    get,
    path = "/api/agents/{id}",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    responses(
        (status = 200, description = "Agent", body = Agent),
        (status = 404, description = "Agent not found")
    ),
    tag = "agents"
)]
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Agent>> {
    let agent = state.repository.get_by_id(&id).await?;
    Ok(Json(agent))
}

/// Create an agent.
#[utoipa::path(
    post,
    path = "/api/agents",
    request_body = CreateAgentInput,
    responses(
        (status = 201, description = "Agent created", body = Agent),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "agents"
)]
pub async fn create_agent(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateAgentInput>,
) -> Result<(StatusCode, Json<Agent>)> {
    let agent = state.repository.create(input).await?;
    info!(agent_id = %agent.id, slug = %agent.slug, "Agent created");
    Ok((StatusCode::CREATED, Json(agent)))
}

/// Partially update an agent. Fields absent from the body keep their values.
#[utoipa::path(
    put,
    path = "/api/agents",
    request_body = UpdateAgentRequest,
    responses(
        (status = 200, description = "Agent updated", body = Agent),
        (status = 400, description = "Missing id or malformed fields"),
        (status = 404, description = "Agent not found"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "agents"
)]
pub async fn update_agent(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdateAgentRequest>,
) -> Result<Json<Agent>> {
    let id = required_id(req.id)?;
    let agent = state.repository.update(&id, req.patch).await?;
    info!(agent_id = %agent.id, enabled = agent.enabled, "Agent updated");
    Ok(Json(agent))
}

/// Permanently delete an agent.
#[utoipa::path(
    delete,
    path = "/api/agents",
    params(DeleteAgentQuery),
    responses(
        (status = 200, description = "Agent deleted", body = DeleteAgentResponse),
        (status = 400, description = "Missing id"),
        (status = 404, description = "Agent not found")
    ),
    tag = "agents"
)]
pub async fn delete_agent(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DeleteAgentQuery>,
) -> Result<Json<DeleteAgentResponse>> {
    let id = required_id(params.id)?;
    state.repository.delete(&id).await?;
    info!(agent_id = %id, "Agent deleted");
    Ok(Json(DeleteAgentResponse { success: true }))
}

/// Send a test command to the agent's endpoint and return the rendered response.
#[utoipa::path(
    post,
    path = "/api/agents/{id}/test",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    request_body = TestAgentRequest,
    responses(
        (status = 200, description = "Rendered agent response", body = TestAgentResponse),
        (status = 400, description = "Empty command"),
        (status = 404, description = "Agent not found")
    ),
    tag = "agents"
)]
pub async fn test_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TestAgentRequest>,
) -> Result<Json<TestAgentResponse>> {
    if req.command.trim().is_empty() {
        return Err(AppError::InvalidInput("Command must not be empty".to_string()));
    }

    let agent = state.repository.get_by_id(&id).await?;
    let result = state.invoker.invoke(&agent, &req.command).await;

    Ok(Json(TestAgentResponse { result }))
}

fn required_id(id: Option<String>) -> Result<String> {
    id.filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Agent id is required".to_string()))
}

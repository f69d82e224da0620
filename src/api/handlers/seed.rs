use crate::agents::seed_sample_agents;
use crate::types::Agent;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<Agent>>,
}

/// Insert the sample agents that are not already present.
#[utoipa::path(
    get,
    path = "/api/seed",
    responses(
        (status = 200, description = "Seeding finished", body = SeedResponse),
        (status = 500, description = "Seeding failed")
    ),
    tag = "maintenance"
)]
pub async fn seed(State(state): State<AppState>) -> Response {
    match seed_sample_agents(state.repository.as_ref()).await {
        Ok(report) => {
            let message = report.message();
            let count = report.count();
            let agents = (count > 0).then_some(report.inserted);

            Json(SeedResponse {
                success: true,
                message,
                count,
                agents,
            })
            .into_response()
        }
        Err(e) => {
            error!(error = %e, "Seeding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

use crate::db::{run_diagnostics, DiagnosticsReport};
use crate::AppState;
use axum::{extract::State, Json};

/// Report store configuration, connectivity and schema status.
#[utoipa::path(
    get,
    path = "/api/debug",
    responses(
        (status = 200, description = "Diagnostics report", body = DiagnosticsReport)
    ),
    tag = "maintenance"
)]
pub async fn debug(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let report = run_diagnostics(&state.config.store, Some(state.repository.clone())).await;
    Json(report)
}

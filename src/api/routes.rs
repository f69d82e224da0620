use crate::api::handlers::{agents, debug, seed};
use crate::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// OpenAPI description of the dashboard API.
#[derive(OpenApi)]
#[openapi(
    paths(
        agents::list_agents,
        agents::list_public_agents,
        agents::get_agent,
        agents::create_agent,
        agents::update_agent,
        agents::delete_agent,
        agents::test_agent,
        seed::seed,
        debug::debug,
    ),
    components(schemas(
        crate::types::Agent,
        crate::types::AgentTool,
        crate::types::ToolParameters,
        crate::types::ToolProperty,
        crate::types::CreateAgentInput,
        crate::types::AgentPatch,
        agents::UpdateAgentRequest,
        agents::DeleteAgentResponse,
        agents::TestAgentRequest,
        agents::TestAgentResponse,
        seed::SeedResponse,
        crate::db::DiagnosticsReport,
    )),
    tags(
        (name = "agents", description = "Agent registry management"),
        (name = "maintenance", description = "Seeding and diagnostics")
    )
)]
pub struct ApiDoc;

/// Routes relative to `/api`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/agents",
            get(agents::list_agents)
                .post(agents::create_agent)
                .put(agents::update_agent)
                .delete(agents::delete_agent),
        )
        .route("/agents/public", get(agents::list_public_agents))
        .route("/agents/{id}", get(agents::get_agent))
        .route("/agents/{id}/test", post(agents::test_agent))
        .route("/seed", get(seed::seed))
        .route("/debug", get(debug::debug))
}

/// Full application: API under `/api`, request tracing and permissive CORS.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new().nest("/api", create_router());

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
    .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

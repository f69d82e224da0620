//! HTTP API Handlers and Routes
//!
//! REST layer of the dashboard, built on the Axum web framework. Every route
//! is stateless: one repository round trip per request.
//!
//! # Module Structure
//!
//! - [`api::extract`](crate::api::extract) - Extractors that reject with a JSON error body
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Agents (`/api/agents`)
//! - `GET /api/agents` - List all agents, newest first
//! - `POST /api/agents` - Create an agent (201)
//! - `PUT /api/agents` - Partially update the agent named by `id` in the body
//! - `DELETE /api/agents?id=...` - Delete an agent
//! - `GET /api/agents/public` - List public, enabled agents
//! - `GET /api/agents/{id}` - Get one agent
//! - `POST /api/agents/{id}/test` - Send a test command to the agent's URL
//!
//! ## Maintenance
//! - `GET /api/seed` - Insert missing sample agents
//! - `GET /api/debug` - Store configuration and connectivity report
//! - `GET /api/health` - Health check endpoint
//!
//! Errors are returned as `{"error": "..."}` with a matching status code.
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Body and query extractors that reject with `AppError`.
pub mod extract;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

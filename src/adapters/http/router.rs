//! Top-level API router.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use super::admin::admin_routes;
use super::members::member_routes;
use super::payments::payment_routes;
use super::state::AppState;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Assemble every route group over `state`.
///
/// Transport layers (tracing, CORS, timeouts) are added by the binary.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/members", member_routes())
        .nest("/payments", payment_routes())
        .nest("/admin", admin_routes(&state))
        .with_state(state)
}

//! Axum router for the admin endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::super::middleware::auth_middleware;
use super::super::state::AppState;
use super::handlers::{
    change_status, collection_report, create_member, defaulters, get_member, grant_exemption,
    list_members, login, record_offline_payment, update_member,
};

/// Create the admin router, mounted at `/admin`.
///
/// # Routes
///
/// ## Public
/// - `POST /login` - Exchange credentials for a bearer token
///
/// ## Bearer token required
/// - `GET /members`, `POST /members` - List and create
/// - `GET /members/:id`, `PUT /members/:id` - Read and edit
/// - `POST /members/:id/status` - Lifecycle changes
/// - `POST /members/:id/payments` - Offline payments
/// - `POST /members/:id/exemptions` - Waivers
/// - `GET /reports/collection`, `GET /reports/defaulters` - Reports
pub fn admin_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/members", get(list_members).post(create_member))
        .route("/members/:id", get(get_member).put(update_member))
        .route("/members/:id/status", post(change_status))
        .route("/members/:id/payments", post(record_offline_payment))
        .route("/members/:id/exemptions", post(grant_exemption))
        .route("/reports/collection", get(collection_report))
        .route("/reports/defaulters", get(defaulters))
        .route_layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ));

    Router::new().route("/login", post(login)).merge(protected)
}

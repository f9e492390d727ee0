//! Axum router for the checkout endpoints.

use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::{calculate, create_order, verify_payment};

/// Create the payments router, mounted at `/payments`.
///
/// # Routes
/// - `POST /calculate` - Due periods with payment options
/// - `POST /create-order` - Open a gateway order
/// - `POST /verify` - Verify the checkout and record the payment
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate))
        .route("/create-order", post(create_order))
        .route("/verify", post(verify_payment))
}

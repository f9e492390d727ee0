//! Axum router for the self-service member endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    get_membership_years, get_payment_calculation, search_members, send_otp, verify_otp,
};

/// Create the member router, mounted at `/members`.
///
/// # Routes
/// - `GET /search` - Lookup by folio number, name or email
/// - `GET /:id/payment-calculation` - Due periods and totals
/// - `GET /:id/membership-years` - Paid years with gap detection
/// - `POST /send-otp` - Email a passcode
/// - `POST /verify-otp` - Check a passcode
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_members))
        .route("/:id/payment-calculation", get(get_payment_calculation))
        .route("/:id/membership-years", get(get_membership_years))
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
}

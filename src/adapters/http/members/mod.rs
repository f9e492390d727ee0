//! HTTP adapter for self-service member endpoints.
//!
//! - `GET /members/search` - Find a member record
//! - `GET /members/:id/payment-calculation` - What the member owes
//! - `GET /members/:id/membership-years` - Paid years and gaps
//! - `POST /members/send-otp` - Email a verification code
//! - `POST /members/verify-otp` - Verify the code

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::member_routes;

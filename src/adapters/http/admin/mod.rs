//! HTTP adapter for admin endpoints.
//!
//! Member management, offline payments, exemptions and reports, all behind
//! a bearer token issued by `POST /admin/login`.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::admin_routes;

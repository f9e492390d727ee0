//! HTTP middleware for axum.
//!
//! - `auth` - Admin authentication middleware and extractor

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAdmin};

//! HTTP adapters - REST API implementations.
//!
//! Each route group has its own DTOs, handlers and router. Shared state,
//! error mapping and admin authentication live alongside.

pub mod admin;
pub mod dto;
pub mod error;
pub mod members;
pub mod middleware;
pub mod payments;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::api_router;
pub use state::{AppState, Clock};

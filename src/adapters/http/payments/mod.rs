//! HTTP adapter for checkout endpoints.
//!
//! - `POST /payments/calculate` - What is owed and how it may be paid
//! - `POST /payments/create-order` - Start a hosted checkout
//! - `POST /payments/verify` - Settle a completed checkout

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_routes;

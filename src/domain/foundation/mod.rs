//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait, admin
//! authentication types and error types shared by the membership and OTP
//! domains.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedAdmin};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::MemberId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

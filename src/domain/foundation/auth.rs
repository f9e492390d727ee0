//! Authentication types for the domain layer.
//!
//! These types describe an authenticated administrator extracted from a
//! session token. They have **no external dependencies**; the token format
//! lives behind the `SessionValidator` port.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after token validation:
//! let admin = AuthenticatedAdmin::new("treasurer");
//!
//! // Inject into request extensions for handlers to use
//! request.extensions_mut().insert(admin);
//! ```

use thiserror::Error;

/// Administrator identity carried by a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub username: String,
}

impl AuthenticatedAdmin {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Authentication errors for sign-in and token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username or password did not match.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Too many sign-in attempts.
    #[error("Too many login attempts. Try again in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// Token signing or a collaborator failed.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the admin should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

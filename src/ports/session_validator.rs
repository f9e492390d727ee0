//! Admin session port.
//!
//! Issues and validates the bearer tokens that guard admin endpoints. The
//! token format is an adapter concern.
//!
//! # Contract
//!
//! Implementations must:
//! - Validate the token signature and expiry
//! - Return `AuthError::InvalidToken` for malformed or badly signed tokens
//! - Return `AuthError::TokenExpired` for expired tokens

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedAdmin, Timestamp};

/// Validates bearer tokens and extracts the admin identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedAdmin, AuthError>;
}

/// Issues bearer tokens after a successful sign-in.
#[async_trait]
pub trait SessionIssuer: Send + Sync {
    async fn issue(
        &self,
        admin: &AuthenticatedAdmin,
        now: Timestamp,
    ) -> Result<IssuedSession, AuthError>;
}

/// A freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: Timestamp,
}

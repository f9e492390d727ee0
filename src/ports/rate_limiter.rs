//! Rate limiting port.
//!
//! Fixed-window counters keyed by scope, identifier and resource. A window
//! opens on the first request and closes `window_secs` later regardless of
//! how many requests arrive in between. Implementations can use in-memory
//! storage for single-process deployments or Redis.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Resource name for OTP sends.
pub const OTP_SEND_RESOURCE: &str = "otp_send";

/// Resource name for admin sign-in attempts.
pub const ADMIN_LOGIN_RESOURCE: &str = "admin_login";

/// Port for rate limiting operations.
///
/// Implementations should be thread-safe and support concurrent access.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if a request at `now` is allowed, consuming quota if so.
    ///
    /// Returns `Allowed` with remaining quota or `Denied` with retry info.
    async fn check(
        &self,
        key: RateLimitKey,
        now: Timestamp,
    ) -> Result<RateLimitResult, RateLimitError>;

    /// Get current status without consuming quota.
    async fn status(
        &self,
        key: RateLimitKey,
        now: Timestamp,
    ) -> Result<RateLimitStatus, RateLimitError>;

    /// Clear the current window, restoring full quota.
    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError>;

    /// Drop windows that closed before `now`. Returns how many were removed.
    ///
    /// Stores with native expiry may return 0.
    async fn sweep(&self, now: Timestamp) -> Result<usize, RateLimitError>;
}

/// Key identifying what to rate limit.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    pub scope: RateLimitScope,
    /// Identifier within the scope (normalized email, admin username).
    pub identifier: String,
    /// Resource the limit applies to, e.g. `otp_send`.
    pub resource: String,
}

/// The scope at which rate limiting is applied.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitScope {
    /// Per member email address.
    Email,
    /// Per admin username.
    Login,
}

impl RateLimitKey {
    /// OTP send quota for an email, keyed case-insensitively.
    pub fn otp_send(email: &str) -> Self {
        Self {
            scope: RateLimitScope::Email,
            identifier: email.trim().to_lowercase(),
            resource: OTP_SEND_RESOURCE.to_string(),
        }
    }

    /// Sign-in attempt quota for an admin username.
    pub fn admin_login(username: &str) -> Self {
        Self {
            scope: RateLimitScope::Login,
            identifier: username.trim().to_lowercase(),
            resource: ADMIN_LOGIN_RESOURCE.to_string(),
        }
    }

    /// Returns the Redis key string for this rate limit key.
    pub fn to_redis_key(&self) -> String {
        format!(
            "ratelimit:{}:{}:{}",
            self.scope.as_str(),
            self.identifier,
            self.resource
        )
    }
}

impl RateLimitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitScope::Email => "email",
            RateLimitScope::Login => "login",
        }
    }
}

impl fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    Allowed(RateLimitStatus),
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitResult::Denied(_))
    }
}

/// Current rate limit status.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// When the current window resets.
    pub reset_at: Timestamp,
    pub window_secs: u32,
}

/// Details of a rate limit denial.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    pub limit: u32,
    /// Seconds until the window closes.
    pub retry_after_secs: u32,
    pub scope: RateLimitScope,
    pub message: String,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),

    /// No limits configured for the key's resource.
    #[error("no rate limit configured for resource: {0}")]
    UnknownResource(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_key_is_case_insensitive() {
        assert_eq!(RateLimitKey::otp_send(" A@B.com"), RateLimitKey::otp_send("a@b.com"));
    }

    #[test]
    fn redis_key_includes_scope_identifier_and_resource() {
        assert_eq!(
            RateLimitKey::otp_send("a@b.com").to_redis_key(),
            "ratelimit:email:a@b.com:otp_send"
        );
        assert_eq!(
            RateLimitKey::admin_login("Admin").to_redis_key(),
            "ratelimit:login:admin:admin_login"
        );
    }

    #[test]
    fn result_predicates() {
        let allowed = RateLimitResult::Allowed(RateLimitStatus {
            limit: 3,
            remaining: 2,
            reset_at: Timestamp::now(),
            window_secs: 600,
        });
        assert!(allowed.is_allowed());

        let denied = RateLimitResult::Denied(RateLimitDenied {
            limit: 3,
            retry_after_secs: 30,
            scope: RateLimitScope::Email,
            message: "Rate limit exceeded".to_string(),
        });
        assert!(denied.is_denied());
    }
}

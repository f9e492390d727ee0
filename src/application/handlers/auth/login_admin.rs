//! LoginAdminHandler - Command handler for administrator sign-in.
//!
//! Credentials come from configuration. Attempts are rate limited per
//! username and compared in constant time.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::domain::foundation::{AuthError, AuthenticatedAdmin, Timestamp};
use crate::ports::{IssuedSession, RateLimitKey, RateLimitResult, RateLimiter, SessionIssuer};

/// The configured administrator account.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct LoginAdminCommand {
    pub username: String,
    pub password: String,
    pub now: Timestamp,
}

pub struct LoginAdminHandler {
    credentials: AdminCredentials,
    rate_limiter: Arc<dyn RateLimiter>,
    sessions: Arc<dyn SessionIssuer>,
}

impl LoginAdminHandler {
    pub fn new(
        credentials: AdminCredentials,
        rate_limiter: Arc<dyn RateLimiter>,
        sessions: Arc<dyn SessionIssuer>,
    ) -> Self {
        Self {
            credentials,
            rate_limiter,
            sessions,
        }
    }

    pub async fn handle(&self, cmd: LoginAdminCommand) -> Result<IssuedSession, AuthError> {
        let key = RateLimitKey::admin_login(&cmd.username);
        let quota = self
            .rate_limiter
            .check(key.clone(), cmd.now)
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        if let RateLimitResult::Denied(denied) = quota {
            tracing::warn!(username = %cmd.username, "Admin login rate limited");
            return Err(AuthError::RateLimited {
                retry_after_secs: u64::from(denied.retry_after_secs),
            });
        }

        if !self.matches(&cmd.username, &cmd.password) {
            tracing::warn!(username = %cmd.username, "Admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        // A successful sign-in restores the full quota
        if let Err(e) = self.rate_limiter.reset(key).await {
            tracing::warn!(error = %e, "Failed to reset admin login quota");
        }

        let admin = AuthenticatedAdmin::new(self.credentials.username.clone());
        let session = self.sessions.issue(&admin, cmd.now).await?;

        tracing::info!(username = %admin.username, "Admin signed in");
        Ok(session)
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = username
            .trim()
            .as_bytes()
            .ct_eq(self.credentials.username.as_bytes());
        let pass_ok = password
            .as_bytes()
            .ct_eq(self.credentials.password.expose_secret().as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

//! OtpService - passcode issuance and verification keyed by email.
//!
//! Per-email lifecycle: absent, active, then consumed (verified), expired
//! or exhausted. Every terminal outcome deletes the record.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::otp::{identity_key, OtpCheck, OtpCode, OtpError, OtpPolicy, OtpRecord};
use crate::ports::{OtpStore, RateLimitKey, RateLimitResult, RateLimiter};

pub struct OtpService {
    store: Arc<dyn OtpStore>,
    rate_limiter: Arc<dyn RateLimiter>,
    policy: OtpPolicy,
}

impl OtpService {
    pub fn new(
        store: Arc<dyn OtpStore>,
        rate_limiter: Arc<dyn RateLimiter>,
        policy: OtpPolicy,
    ) -> Self {
        Self {
            store,
            rate_limiter,
            policy,
        }
    }

    pub fn policy(&self) -> &OtpPolicy {
        &self.policy
    }

    /// Consumes one send from the email's quota.
    pub async fn check_send_quota(&self, email: &str, now: Timestamp) -> Result<(), OtpError> {
        let result = self
            .rate_limiter
            .check(RateLimitKey::otp_send(email), now)
            .await
            .map_err(|e| OtpError::Infrastructure(e.to_string()))?;

        match result {
            RateLimitResult::Allowed(_) => Ok(()),
            RateLimitResult::Denied(denied) => {
                tracing::warn!(
                    retry_after_secs = denied.retry_after_secs,
                    "OTP send rate limited"
                );
                Err(OtpError::RateLimited {
                    retry_after_secs: u64::from(denied.retry_after_secs),
                })
            }
        }
    }

    /// Stores `otp` for `email`, replacing any active code.
    pub async fn store(&self, email: &str, otp: OtpCode, now: Timestamp) -> Result<OtpRecord, OtpError> {
        let record = OtpRecord::issue(otp, now, &self.policy);
        self.store.set(&identity_key(email), &record, now).await?;
        Ok(record)
    }

    /// Rate-limits, generates and stores a fresh code.
    pub async fn issue(&self, email: &str, now: Timestamp) -> Result<OtpRecord, OtpError> {
        self.check_send_quota(email, now).await?;
        self.store(email, OtpCode::generate(), now).await
    }

    /// Drops any active code for `email`.
    pub async fn revoke(&self, email: &str) -> Result<(), OtpError> {
        self.store.delete(&identity_key(email)).await?;
        Ok(())
    }

    /// Checks `candidate` against the active code for `email`.
    ///
    /// Outcomes are decided in order: no code, expired, attempts spent,
    /// wrong code. A candidate that is not six digits is just a wrong code
    /// and spends an attempt.
    pub async fn verify(&self, email: &str, candidate: &str, now: Timestamp) -> Result<(), OtpError> {
        let outcome = self
            .store
            .check_and_consume(&identity_key(email), candidate, now, &self.policy)
            .await?
            .ok_or(OtpError::NotFound)?;

        match outcome {
            OtpCheck::Verified => Ok(()),
            OtpCheck::Expired => Err(OtpError::Expired),
            OtpCheck::Exhausted => {
                tracing::warn!("OTP attempts exhausted");
                Err(OtpError::TooManyAttempts)
            }
            OtpCheck::Mismatch { remaining } => {
                tracing::warn!(remaining, "Invalid OTP submitted");
                Err(OtpError::Invalid { remaining })
            }
        }
    }

    /// Removes expired codes and closed rate-limit windows.
    pub async fn sweep(&self, now: Timestamp) -> (usize, usize) {
        let codes = self.store.sweep(now).await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "OTP sweep failed");
            0
        });
        let windows = self.rate_limiter.sweep(now).await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Rate limit sweep failed");
            0
        });
        if codes + windows > 0 {
            tracing::debug!(codes, windows, "Swept expired entries");
        }
        (codes, windows)
    }
}

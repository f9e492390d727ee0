//! Stored OTP state per identity.
//!
//! An identity moves through absent, active, then one of expired,
//! exhausted or consumed. Every terminal outcome deletes the record, so a
//! later verify sees absent again.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::code::OtpCode;

/// Lifetime of an issued code.
pub const DEFAULT_OTP_TTL_SECS: u64 = 300;

/// Failed verifications allowed before the code is burned.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Store key for an email: trimmed and lowercased.
pub fn identity_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Verification limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpPolicy {
    pub ttl_secs: u64,
    pub max_attempts: u32,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_OTP_TTL_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// An issued code awaiting verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    pub otp: OtpCode,
    pub expires_at: Timestamp,
    pub attempts: u32,
}

/// Result of checking a candidate against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    /// Correct code. Record must be deleted.
    Verified,
    /// Past expiry. Record must be deleted.
    Expired,
    /// Attempt budget spent. Record must be deleted.
    Exhausted,
    /// Wrong code. Record must be saved with the new attempt count.
    Mismatch { remaining: u32 },
}

impl OtpRecord {
    pub fn issue(otp: OtpCode, now: Timestamp, policy: &OtpPolicy) -> Self {
        Self {
            otp,
            expires_at: now.plus_secs(policy.ttl_secs),
            attempts: 0,
        }
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.is_after(&self.expires_at)
    }

    /// Seconds the record should live in a TTL store.
    pub fn ttl_secs(&self, now: Timestamp) -> u64 {
        now.secs_until(&self.expires_at).max(1)
    }

    /// Checks `candidate`, counting a failed attempt on mismatch.
    ///
    /// Expiry wins over attempts, and attempts win over the comparison,
    /// so a burned code fails even when the candidate is right.
    pub fn check(&mut self, candidate: &str, now: Timestamp, policy: &OtpPolicy) -> OtpCheck {
        if self.is_expired(now) {
            return OtpCheck::Expired;
        }
        if self.attempts >= policy.max_attempts {
            return OtpCheck::Exhausted;
        }
        if self.otp.matches(candidate) {
            return OtpCheck::Verified;
        }

        self.attempts += 1;
        OtpCheck::Mismatch {
            remaining: policy.max_attempts.saturating_sub(self.attempts),
        }
    }
}

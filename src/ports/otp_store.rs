//! OTP store port.
//!
//! Ephemeral, expiring key-value state for issued codes. Keys are
//! normalized identities (see [`identity_key`](crate::domain::otp::identity_key)).
//! Callers re-check expiry on every read, so a store that has not swept
//! yet is still correct.

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::otp::{OtpCheck, OtpPolicy, OtpRecord};
use async_trait::async_trait;

#[async_trait]
pub trait OtpStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Create or overwrite the record for `key`, resetting its attempts.
    ///
    /// `now` lets TTL-based stores derive the remaining lifetime.
    async fn set(&self, key: &str, record: &OtpRecord, now: Timestamp) -> Result<(), DomainError>;

    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    /// Checks `candidate` against the record for `key` and applies the
    /// outcome as one atomic step.
    ///
    /// Returns `None` when no record exists. A `Mismatch` leaves the
    /// incremented attempt count stored; every other outcome deletes the
    /// record. Concurrent callers never observe the same attempt count,
    /// and at most one of them sees `Verified`.
    async fn check_and_consume(
        &self,
        key: &str,
        candidate: &str,
        now: Timestamp,
        policy: &OtpPolicy,
    ) -> Result<Option<OtpCheck>, DomainError>;

    /// Drop records expired at `now`. Returns how many were removed.
    async fn sweep(&self, now: Timestamp) -> Result<usize, DomainError>;
}

//! Redis-backed OTP store.
//!
//! Records are stored as JSON with a TTL matching their expiry, so Redis
//! drops them on its own. Failed attempts live in a separate counter key
//! so verification can claim an attempt with a single `INCR` instead of a
//! read-modify-write of the record.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::otp::{OtpCheck, OtpPolicy, OtpRecord};
use crate::ports::OtpStore;

#[derive(Clone)]
pub struct RedisOtpStore {
    conn: MultiplexedConnection,
}

impl RedisOtpStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    fn key(identity: &str) -> String {
        format!("otp:{}", identity)
    }

    fn attempts_key(identity: &str) -> String {
        format!("otp:{}:attempts", identity)
    }

    async fn discard(&self, identity: &str) -> Result<u32, DomainError> {
        let mut conn = self.conn.clone();
        let (removed,): (u32,) = redis::pipe()
            .atomic()
            .del(Self::key(identity))
            .del(Self::attempts_key(identity))
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(removed)
    }
}

fn cache_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::CacheError, e.to_string())
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn get(&self, key: &str) -> Result<Option<OtpRecord>, DomainError> {
        let mut conn = self.conn.clone();
        let (json, attempts): (Option<String>, Option<u32>) = redis::pipe()
            .get(Self::key(key))
            .get(Self::attempts_key(key))
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        match json {
            Some(j) => {
                let mut record: OtpRecord = serde_json::from_str(&j).map_err(cache_error)?;
                record.attempts = attempts.unwrap_or(0);
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, record: &OtpRecord, now: Timestamp) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(record).map_err(cache_error)?;

        redis::pipe()
            .atomic()
            .set_ex(Self::key(key), json, record.ttl_secs(now))
            .ignore()
            .del(Self::attempts_key(key))
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(cache_error)
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.discard(key).await.map(|_| ())
    }

    async fn check_and_consume(
        &self,
        key: &str,
        candidate: &str,
        now: Timestamp,
        policy: &OtpPolicy,
    ) -> Result<Option<OtpCheck>, DomainError> {
        let Some(mut record) = self.get(key).await? else {
            return Ok(None);
        };

        // Claim this attempt before comparing; each caller gets a distinct count.
        let mut conn = self.conn.clone();
        let attempts_key = Self::attempts_key(key);
        let (claimed,): (u32,) = redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(&attempts_key)
            .cmd("EXPIRE")
            .arg(&attempts_key)
            .arg(record.ttl_secs(now))
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        record.attempts = claimed.saturating_sub(1);

        let outcome = record.check(candidate, now, policy);
        match outcome {
            OtpCheck::Mismatch { .. } => Ok(Some(outcome)),
            OtpCheck::Verified => {
                // Only the caller whose DEL removed the record consumes it.
                if self.discard(key).await? == 0 {
                    Ok(None)
                } else {
                    Ok(Some(outcome))
                }
            }
            OtpCheck::Expired | OtpCheck::Exhausted => {
                self.discard(key).await?;
                Ok(Some(outcome))
            }
        }
    }

    /// Redis expires records itself.
    async fn sweep(&self, _now: Timestamp) -> Result<usize, DomainError> {
        Ok(0)
    }
}

impl std::fmt::Debug for RedisOtpStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisOtpStore").finish_non_exhaustive()
    }
}

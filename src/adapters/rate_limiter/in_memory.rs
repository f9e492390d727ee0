//! In-memory rate limiter for single-process deployments and tests.
//!
//! Uses a fixed-window counter algorithm with an in-memory HashMap.
//! Counters are not shared between processes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

use super::config::RateLimitConfig;

/// In-memory fixed-window rate limiter.
///
/// Each window opens on the first request for a key and tracks the count
/// until it closes. Denied requests do not extend or refill the window.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: u64,
    window_secs: u32,
}

impl WindowState {
    fn window_end(&self) -> u64 {
        self.window_start + self.window_secs as u64
    }

    fn is_closed(&self, now: u64) -> bool {
        now >= self.window_end()
    }
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    /// Number of tracked windows, open or not yet swept.
    pub async fn len(&self) -> usize {
        self.windows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.windows.read().await.is_empty()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(
        &self,
        key: RateLimitKey,
        now: Timestamp,
    ) -> Result<RateLimitResult, RateLimitError> {
        let redis_key = key.to_redis_key();
        let (limit, window_secs) = self.config.limits_for(&key)?;
        let now = now.as_unix_secs();

        let mut windows = self.windows.write().await;

        let state = windows.entry(redis_key).or_insert_with(|| WindowState {
            count: 0,
            window_start: now,
            window_secs,
        });

        if state.is_closed(now) {
            state.count = 0;
            state.window_start = now;
            state.window_secs = window_secs;
        }

        if state.count >= limit {
            let retry_after = state.window_end().saturating_sub(now) as u32;

            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after.max(1),
                scope: key.scope,
                message: format!(
                    "Rate limit exceeded for {}. Retry after {} seconds.",
                    key.scope,
                    retry_after.max(1)
                ),
            }));
        }

        state.count += 1;
        let remaining = limit.saturating_sub(state.count);
        let reset_at = Timestamp::from_unix_secs(state.window_end());

        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining,
            reset_at,
            window_secs,
        }))
    }

    async fn status(
        &self,
        key: RateLimitKey,
        now: Timestamp,
    ) -> Result<RateLimitStatus, RateLimitError> {
        let redis_key = key.to_redis_key();
        let (limit, window_secs) = self.config.limits_for(&key)?;
        let now = now.as_unix_secs();

        let windows = self.windows.read().await;

        let (count, window_start) = windows
            .get(&redis_key)
            .filter(|state| !state.is_closed(now))
            .map(|state| (state.count, state.window_start))
            .unwrap_or((0, now));

        Ok(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(count),
            reset_at: Timestamp::from_unix_secs(window_start + window_secs as u64),
            window_secs,
        })
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        let mut windows = self.windows.write().await;
        windows.remove(&key.to_redis_key());
        Ok(())
    }

    async fn sweep(&self, now: Timestamp) -> Result<usize, RateLimitError> {
        let now = now.as_unix_secs();
        let mut windows = self.windows.write().await;
        let before = windows.len();
        windows.retain(|_, state| !state.is_closed(now));
        Ok(before - windows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RateLimitScope;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_750_000_000)
    }

    #[tokio::test]
    async fn fourth_send_in_window_is_denied() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let key = RateLimitKey::otp_send("member@example.com");

        for i in 0..3 {
            let result = limiter.check(key.clone(), t0().plus_secs(i * 60)).await.unwrap();
            assert!(result.is_allowed(), "send {} should be allowed", i + 1);
        }

        let result = limiter.check(key.clone(), t0().plus_secs(200)).await.unwrap();
        match result {
            RateLimitResult::Denied(denied) => {
                assert_eq!(denied.limit, 3);
                assert_eq!(denied.retry_after_secs, 400);
                assert_eq!(denied.scope, RateLimitScope::Email);
            }
            RateLimitResult::Allowed(_) => panic!("fourth send should be denied"),
        }
    }

    #[tokio::test]
    async fn window_resets_relative_to_first_send() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let key = RateLimitKey::otp_send("member@example.com");

        limiter.check(key.clone(), t0()).await.unwrap();
        limiter.check(key.clone(), t0().plus_secs(500)).await.unwrap();
        limiter.check(key.clone(), t0().plus_secs(590)).await.unwrap();

        assert!(limiter
            .check(key.clone(), t0().plus_secs(599))
            .await
            .unwrap()
            .is_denied());
        assert!(limiter
            .check(key.clone(), t0().plus_secs(600))
            .await
            .unwrap()
            .is_allowed());
    }

    #[tokio::test]
    async fn keys_are_independent_and_case_insensitive() {
        let limiter = InMemoryRateLimiter::with_defaults();

        for _ in 0..3 {
            limiter
                .check(RateLimitKey::otp_send("A@b.com"), t0())
                .await
                .unwrap();
        }

        assert!(limiter
            .check(RateLimitKey::otp_send("a@B.com"), t0())
            .await
            .unwrap()
            .is_denied());
        assert!(limiter
            .check(RateLimitKey::otp_send("other@b.com"), t0())
            .await
            .unwrap()
            .is_allowed());
    }

    #[tokio::test]
    async fn status_does_not_consume_quota() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let key = RateLimitKey::otp_send("member@example.com");

        let status = limiter.status(key.clone(), t0()).await.unwrap();
        assert_eq!(status.remaining, 3);

        limiter.check(key.clone(), t0()).await.unwrap();
        let status = limiter.status(key.clone(), t0()).await.unwrap();
        assert_eq!(status.remaining, 2);
        assert_eq!(status.reset_at, t0().plus_secs(600));
    }

    #[tokio::test]
    async fn reset_restores_quota() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let key = RateLimitKey::otp_send("member@example.com");
        for _ in 0..3 {
            limiter.check(key.clone(), t0()).await.unwrap();
        }

        limiter.reset(key.clone()).await.unwrap();

        assert!(limiter.check(key, t0()).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn sweep_drops_closed_windows_only() {
        let limiter = InMemoryRateLimiter::with_defaults();
        limiter
            .check(RateLimitKey::otp_send("old@example.com"), t0())
            .await
            .unwrap();
        limiter
            .check(RateLimitKey::otp_send("new@example.com"), t0().plus_secs(500))
            .await
            .unwrap();

        let removed = limiter.sweep(t0().plus_secs(650)).await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(limiter.len().await, 1);
    }

    #[tokio::test]
    async fn unconfigured_resource_is_an_error() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig::empty());
        let result = limiter.check(RateLimitKey::otp_send("a@b.com"), t0()).await;
        assert!(matches!(result, Err(RateLimitError::UnknownResource(_))));
    }
}

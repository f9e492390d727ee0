//! In-memory OTP store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::otp::{OtpCheck, OtpPolicy, OtpRecord};
use crate::ports::OtpStore;

/// Process-local OTP store. Expired records linger until swept or read.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOtpStore {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(&self, key: &str) -> Result<Option<OtpRecord>, DomainError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, record: &OtpRecord, _now: Timestamp) -> Result<(), DomainError> {
        self.records
            .write()
            .await
            .insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn check_and_consume(
        &self,
        key: &str,
        candidate: &str,
        now: Timestamp,
        policy: &OtpPolicy,
    ) -> Result<Option<OtpCheck>, DomainError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(key) else {
            return Ok(None);
        };

        let outcome = record.check(candidate, now, policy);
        if !matches!(outcome, OtpCheck::Mismatch { .. }) {
            records.remove(key);
        }
        Ok(Some(outcome))
    }

    async fn sweep(&self, now: Timestamp) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        Ok(before - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::otp::OtpCode;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_750_000_000)
    }

    fn record(at: Timestamp) -> OtpRecord {
        OtpRecord::issue(OtpCode::parse("123456").unwrap(), at, &OtpPolicy::default())
    }

    #[tokio::test]
    async fn set_overwrites_existing_record() {
        let store = InMemoryOtpStore::new();
        store.set("a@b.com", &record(t0()), t0()).await.unwrap();
        let mut updated = record(t0());
        updated.attempts = 2;
        store.set("a@b.com", &updated, t0()).await.unwrap();

        assert_eq!(store.get("a@b.com").await.unwrap().unwrap().attempts, 2);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = InMemoryOtpStore::new();
        store.set("a@b.com", &record(t0()), t0()).await.unwrap();
        store.delete("a@b.com").await.unwrap();
        assert!(store.get("a@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sweep_removes_only_expired() {
        let store = InMemoryOtpStore::new();
        store.set("old@b.com", &record(t0()), t0()).await.unwrap();
        store
            .set("new@b.com", &record(t0().plus_secs(200)), t0().plus_secs(200))
            .await
            .unwrap();

        let removed = store.sweep(t0().plus_secs(400)).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.get("new@b.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn mismatch_keeps_record_with_counted_attempt() {
        let store = InMemoryOtpStore::new();
        store.set("a@b.com", &record(t0()), t0()).await.unwrap();

        let outcome = store
            .check_and_consume("a@b.com", "000000", t0(), &OtpPolicy::default())
            .await
            .unwrap();

        assert_eq!(outcome, Some(OtpCheck::Mismatch { remaining: 4 }));
        assert_eq!(store.get("a@b.com").await.unwrap().unwrap().attempts, 1);
    }

    #[tokio::test]
    async fn verified_code_is_removed() {
        let store = InMemoryOtpStore::new();
        store.set("a@b.com", &record(t0()), t0()).await.unwrap();

        let policy = OtpPolicy::default();
        assert_eq!(
            store.check_and_consume("a@b.com", "123456", t0(), &policy).await.unwrap(),
            Some(OtpCheck::Verified)
        );
        assert_eq!(
            store.check_and_consume("a@b.com", "123456", t0(), &policy).await.unwrap(),
            None
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_wrong_guesses_respect_attempt_cap() {
        let store = InMemoryOtpStore::new();
        store.set("a@b.com", &record(t0()), t0()).await.unwrap();

        let tasks: Vec<_> = (0..40)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .check_and_consume("a@b.com", "000000", t0(), &OtpPolicy::default())
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut mismatches = 0;
        for task in tasks {
            if let Some(OtpCheck::Mismatch { .. }) = task.await.unwrap() {
                mismatches += 1;
            }
        }

        assert_eq!(mismatches, 5);
        assert!(store.is_empty().await);
    }
}

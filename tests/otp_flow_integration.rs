//! Integration tests for member email verification.
//!
//! Wires the OTP service over the in-memory store and rate limiter and
//! reads the sent code back from the logging email sender.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use member_dues::adapters::{
    InMemoryMemberStore, InMemoryOtpStore, InMemoryRateLimiter, LoggingEmailSender,
};
use member_dues::application::{
    OtpService, SendOtpCommand, SendOtpHandler, VerificationError, VerifyOtpCommand,
    VerifyOtpHandler,
};
use member_dues::domain::foundation::Timestamp;
use member_dues::domain::membership::{Member, MemberDetails, PeriodCatalog};
use member_dues::domain::otp::{OtpError, OtpPolicy};
use member_dues::ports::MemberRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn t0() -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap())
}

struct Harness {
    store: Arc<InMemoryMemberStore>,
    otp: Arc<OtpService>,
    email: LoggingEmailSender,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: Arc::new(InMemoryMemberStore::new()),
            otp: Arc::new(OtpService::new(
                Arc::new(InMemoryOtpStore::new()),
                Arc::new(InMemoryRateLimiter::with_defaults()),
                OtpPolicy::default(),
            )),
            email: LoggingEmailSender::new(),
        }
    }

    async fn register(&self, folio: &str, email: Option<&str>) -> Member {
        let member = Member::register(
            MemberDetails {
                folio_number: folio.to_string(),
                name: "Ravi Menon".to_string(),
                email: email.map(String::from),
                phone: None,
                join_date: None,
            },
            None,
            &PeriodCatalog::default(),
            t0(),
        )
        .unwrap();
        self.store.save(&member).await.unwrap();
        member
    }

    async fn send(&self, member: &Member, now: Timestamp) -> Result<String, VerificationError> {
        SendOtpHandler::new(
            self.store.clone(),
            self.otp.clone(),
            Arc::new(self.email.clone()),
        )
        .handle(SendOtpCommand {
            member_id: member.id,
            now,
        })
        .await?;

        let message = self
            .email
            .last_to(member.email.as_deref().unwrap_or_default())
            .expect("code was emailed");
        Ok(message
            .text
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| part.len() == 6)
            .expect("message carries a six digit code")
            .to_string())
    }

    async fn verify(
        &self,
        member: &Member,
        otp: &str,
        now: Timestamp,
    ) -> Result<Member, VerificationError> {
        VerifyOtpHandler::new(self.store.clone(), self.otp.clone())
            .handle(VerifyOtpCommand {
                member_id: member.id,
                otp: otp.to_string(),
                now,
            })
            .await
    }
}

fn wrong(code: &str) -> String {
    if code == "000000" {
        "111111".to_string()
    } else {
        "000000".to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn emailed_code_verifies_once() {
    let h = Harness::new();
    let member = h.register("F-300", Some("ravi@example.org")).await;

    let code = h.send(&member, t0()).await.unwrap();
    let verified = h.verify(&member, &code, t0().plus_secs(30)).await.unwrap();
    assert_eq!(verified.id, member.id);

    let reused = h.verify(&member, &code, t0().plus_secs(31)).await.unwrap_err();
    assert_eq!(reused, VerificationError::Otp(OtpError::NotFound));
}

#[tokio::test]
async fn code_expires_after_five_minutes() {
    let h = Harness::new();
    let member = h.register("F-301", Some("ravi@example.org")).await;

    let code = h.send(&member, t0()).await.unwrap();
    let err = h.verify(&member, &code, t0().plus_secs(301)).await.unwrap_err();

    assert_eq!(err, VerificationError::Otp(OtpError::Expired));
}

#[tokio::test]
async fn five_wrong_guesses_burn_the_code() {
    let h = Harness::new();
    let member = h.register("F-302", Some("ravi@example.org")).await;
    let code = h.send(&member, t0()).await.unwrap();
    let guess = wrong(&code);

    for remaining in (0..=4).rev() {
        let err = h.verify(&member, &guess, t0()).await.unwrap_err();
        assert_eq!(err, VerificationError::Otp(OtpError::Invalid { remaining }));
    }

    // The right code no longer helps
    let err = h.verify(&member, &code, t0()).await.unwrap_err();
    assert_eq!(err, VerificationError::Otp(OtpError::TooManyAttempts));
    let err = h.verify(&member, &code, t0()).await.unwrap_err();
    assert_eq!(err, VerificationError::Otp(OtpError::NotFound));
}

#[tokio::test]
async fn resend_replaces_the_previous_code() {
    let h = Harness::new();
    let member = h.register("F-303", Some("ravi@example.org")).await;

    let first = h.send(&member, t0()).await.unwrap();
    let second = h.send(&member, t0().plus_secs(10)).await.unwrap();

    if first != second {
        let err = h.verify(&member, &first, t0().plus_secs(20)).await.unwrap_err();
        assert!(matches!(err, VerificationError::Otp(OtpError::Invalid { .. })));
    }
    assert!(h.verify(&member, &second, t0().plus_secs(20)).await.is_ok());
}

#[tokio::test]
async fn sends_are_rate_limited_per_email() {
    let h = Harness::new();
    let member = h.register("F-304", Some("ravi@example.org")).await;

    for i in 0..3 {
        h.send(&member, t0().plus_secs(i)).await.unwrap();
    }
    let err = h.send(&member, t0().plus_secs(5)).await.unwrap_err();
    assert!(matches!(
        err,
        VerificationError::Otp(OtpError::RateLimited { .. })
    ));

    // A fresh window opens after ten minutes
    assert!(h.send(&member, t0().plus_secs(601)).await.is_ok());
}

#[tokio::test]
async fn member_without_email_cannot_request_a_code() {
    let h = Harness::new();
    let member = h.register("F-305", None).await;

    let err = h.send(&member, t0()).await.unwrap_err();

    assert!(matches!(
        err,
        VerificationError::Member(member_dues::domain::membership::MembershipError::EmailMissing(_))
    ));
    assert!(h.email.sent().is_empty());
}

#[tokio::test]
async fn sweep_clears_expired_codes() {
    let h = Harness::new();
    let member = h.register("F-306", Some("ravi@example.org")).await;
    h.send(&member, t0()).await.unwrap();

    let (codes, _) = h.otp.sweep(t0().plus_secs(301)).await;
    assert_eq!(codes, 1);
}

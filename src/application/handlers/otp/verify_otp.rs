//! VerifyOtpHandler - Command handler for checking a member's passcode.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{Member, MembershipError};
use crate::ports::MemberRepository;

use super::errors::VerificationError;
use super::service::OtpService;
use crate::application::handlers::dues::load_member;

#[derive(Debug, Clone)]
pub struct VerifyOtpCommand {
    pub member_id: MemberId,
    pub otp: String,
    pub now: Timestamp,
}

pub struct VerifyOtpHandler {
    repository: Arc<dyn MemberRepository>,
    otp: Arc<OtpService>,
}

impl VerifyOtpHandler {
    pub fn new(repository: Arc<dyn MemberRepository>, otp: Arc<OtpService>) -> Self {
        Self { repository, otp }
    }

    /// Returns the verified member.
    pub async fn handle(&self, cmd: VerifyOtpCommand) -> Result<Member, VerificationError> {
        let member = load_member(&self.repository, &cmd.member_id).await?;
        let email = member
            .email
            .as_deref()
            .ok_or(MembershipError::EmailMissing(member.id))?;

        self.otp.verify(email, &cmd.otp, cmd.now).await?;

        tracing::info!(member_id = %member.id, "Member verified by OTP");
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::otp::InMemoryOtpStore;
    use crate::adapters::rate_limiter::InMemoryRateLimiter;
    use crate::application::handlers::test_support::{june_2025, member, store_with};
    use crate::domain::otp::{OtpCode, OtpError, OtpPolicy};

    async fn setup() -> (VerifyOtpHandler, Arc<OtpService>, MemberId) {
        let m = member("F-001", Some("Asha@Example.com"), 21);
        let repo = store_with(&m, &[]).await;
        let otp = Arc::new(OtpService::new(
            Arc::new(InMemoryOtpStore::new()),
            Arc::new(InMemoryRateLimiter::with_defaults()),
            OtpPolicy::default(),
        ));
        (VerifyOtpHandler::new(repo, otp.clone()), otp, m.id)
    }

    fn cmd(member_id: MemberId, otp: &str) -> VerifyOtpCommand {
        VerifyOtpCommand {
            member_id,
            otp: otp.to_string(),
            now: june_2025(),
        }
    }

    #[tokio::test]
    async fn correct_code_returns_member() {
        let (handler, otp, id) = setup().await;
        otp.store("asha@example.com", OtpCode::parse("654321").unwrap(), june_2025())
            .await
            .unwrap();

        let verified = handler.handle(cmd(id, "654321")).await.unwrap();
        assert_eq!(verified.id, id);
    }

    #[tokio::test]
    async fn wrong_code_reports_remaining_attempts() {
        let (handler, otp, id) = setup().await;
        otp.store("asha@example.com", OtpCode::parse("654321").unwrap(), june_2025())
            .await
            .unwrap();

        let err = handler.handle(cmd(id, "111111")).await.unwrap_err();
        assert_eq!(
            err,
            VerificationError::Otp(OtpError::Invalid { remaining: 4 })
        );
    }

    #[tokio::test]
    async fn no_code_issued_is_not_found() {
        let (handler, _, id) = setup().await;

        let err = handler.handle(cmd(id, "111111")).await.unwrap_err();
        assert_eq!(err, VerificationError::Otp(OtpError::NotFound));
    }
}

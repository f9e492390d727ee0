//! SendOtpHandler - Command handler for emailing a passcode to a member.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{mask_email, MembershipError};
use crate::ports::{EmailMessage, EmailSender, MemberRepository};

use super::errors::VerificationError;
use super::service::OtpService;
use crate::application::handlers::dues::load_member;

#[derive(Debug, Clone)]
pub struct SendOtpCommand {
    pub member_id: MemberId,
    pub now: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOtpResult {
    /// Where the code went, masked for display.
    pub masked_email: String,
    pub expires_at: Timestamp,
}

pub struct SendOtpHandler {
    repository: Arc<dyn MemberRepository>,
    otp: Arc<OtpService>,
    email: Arc<dyn EmailSender>,
}

impl SendOtpHandler {
    pub fn new(
        repository: Arc<dyn MemberRepository>,
        otp: Arc<OtpService>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            repository,
            otp,
            email,
        }
    }

    pub async fn handle(&self, cmd: SendOtpCommand) -> Result<SendOtpResult, VerificationError> {
        // 1. Member must have an email on file
        let member = load_member(&self.repository, &cmd.member_id).await?;
        let email = member
            .email
            .clone()
            .ok_or(MembershipError::EmailMissing(member.id))?;

        // 2. Quota, then a fresh code
        let record = self.otp.issue(&email, cmd.now).await?;

        // 3. Deliver; an undelivered code is useless, so drop it
        let message = EmailMessage::otp(&email, &record.otp, self.otp.policy().ttl_secs);
        if let Err(e) = self.email.send(message).await {
            tracing::error!(member_id = %member.id, error = %e, "OTP email delivery failed");
            self.otp.revoke(&email).await?;
            return Err(e.into());
        }

        tracing::info!(member_id = %member.id, "OTP sent");

        Ok(SendOtpResult {
            masked_email: mask_email(&email),
            expires_at: record.expires_at,
        })
    }
}

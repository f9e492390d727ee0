//! Outbound email port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::otp::OtpCode;

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}

/// A plain-text email.
///
/// `Debug` omits the body, which may carry a passcode.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl EmailMessage {
    /// Verification email carrying `code`.
    pub fn otp(to: impl Into<String>, code: &OtpCode, ttl_secs: u64) -> Self {
        let minutes = (ttl_secs / 60).max(1);
        Self {
            to: to.into(),
            subject: "Your membership verification code".to_string(),
            text: format!(
                "Your verification code is: {}\n\nThis code expires in {} minutes. \
                 If you did not request it, you can ignore this email.",
                code.as_str(),
                minutes
            ),
        }
    }
}

impl std::fmt::Debug for EmailMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailMessage")
            .field("to", &self.to)
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("email transport failed: {0}")]
    Transport(String),

    #[error("email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl From<EmailError> for DomainError {
    fn from(err: EmailError) -> Self {
        DomainError::new(ErrorCode::EmailDeliveryFailed, err.to_string())
    }
}

//! Errors from the member verification flow.

use thiserror::Error;

use crate::domain::membership::MembershipError;
use crate::domain::otp::OtpError;
use crate::ports::EmailError;

/// Member lookup, passcode and delivery failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error(transparent)]
    Member(#[from] MembershipError),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error("Could not send the verification email: {0}")]
    Delivery(#[from] EmailError),
}

//! OTP verification errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    /// No active code for this identity, or it was already used.
    #[error("OTP expired or not found")]
    NotFound,

    #[error("OTP has expired. Please request a new one")]
    Expired,

    #[error("Too many failed attempts. Please request a new OTP")]
    TooManyAttempts,

    #[error("Invalid OTP. {remaining} attempts remaining")]
    Invalid { remaining: u32 },

    #[error("OTP must be a 6-digit code")]
    Malformed,

    #[error("Too many OTP requests. Try again in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    #[error("OTP store error: {0}")]
    Infrastructure(String),
}

impl OtpError {
    pub fn code(&self) -> ErrorCode {
        match self {
            OtpError::NotFound => ErrorCode::OtpNotFound,
            OtpError::Expired => ErrorCode::OtpExpired,
            OtpError::TooManyAttempts => ErrorCode::TooManyAttempts,
            OtpError::Invalid { .. } | OtpError::Malformed => ErrorCode::OtpInvalid,
            OtpError::RateLimited { .. } => ErrorCode::RateLimited,
            OtpError::Infrastructure(_) => ErrorCode::CacheError,
        }
    }
}

impl From<DomainError> for OtpError {
    fn from(err: DomainError) -> Self {
        OtpError::Infrastructure(err.to_string())
    }
}

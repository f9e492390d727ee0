//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address")]
    InvalidBindAddress,

    #[error("Request timeout must be between 1 and 120 seconds")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Database pool size must be between 1 and 50")]
    InvalidPoolSize,

    #[error("JWT secret must be at least 32 bytes in production")]
    JwtSecretTooShort,

    #[error("Admin token lifetime must be between 5 minutes and 7 days")]
    InvalidTokenTtl,

    #[error("Razorpay key id and secret must be set together")]
    IncompleteRazorpayKeys,

    #[error("Invalid Razorpay key id format")]
    InvalidRazorpayKey,

    #[error("Currency must be a three-letter ISO code")]
    InvalidCurrency,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Invalid period range: {0}")]
    InvalidPeriodRange(String),

    #[error("Fee per period must be positive")]
    InvalidFee,

    #[error("Invalid OTP setting: {0}")]
    InvalidOtpSetting(&'static str),
}

//! OTP domain module.
//!
//! One-time passcodes that prove a member controls their registered email.

mod code;
mod errors;
mod record;

pub use code::{OtpCode, OTP_LENGTH};
pub use errors::OtpError;
pub use record::{
    identity_key, OtpCheck, OtpPolicy, OtpRecord, DEFAULT_MAX_ATTEMPTS, DEFAULT_OTP_TTL_SECS,
};

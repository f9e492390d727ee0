//! Member verification handlers.
//!
//! ## Commands
//! - Sending a passcode to the member's registered email
//! - Verifying a submitted passcode
//!
//! `OtpService` holds the email-keyed passcode lifecycle both handlers share.

mod errors;
mod send_otp;
mod service;
mod verify_otp;

pub use errors::VerificationError;
pub use send_otp::{SendOtpCommand, SendOtpHandler, SendOtpResult};
pub use service::OtpService;
pub use verify_otp::{VerifyOtpCommand, VerifyOtpHandler};

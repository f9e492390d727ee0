//! One-time passcodes.

use std::fmt;

use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use super::errors::OtpError;

/// Number of digits in a passcode.
pub const OTP_LENGTH: usize = 6;

/// A six-digit numeric passcode. Leading zeros are significant.
///
/// `Debug` never prints the digits.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Draws a uniformly random code from the operating system RNG.
    pub fn generate() -> Self {
        let value: u32 = OsRng.gen_range(0..1_000_000);
        Self(format!("{:06}", value))
    }

    /// Accepts exactly six ASCII digits.
    pub fn parse(value: &str) -> Result<Self, OtpError> {
        let value = value.trim();
        if value.len() == OTP_LENGTH && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(OtpError::Malformed)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against a submitted candidate.
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        candidate.len() == self.0.len() && bool::from(self.0.as_bytes().ct_eq(candidate.as_bytes()))
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

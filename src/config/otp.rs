//! OTP configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::otp::{OtpPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_OTP_TTL_SECS};

use super::error::ValidationError;

/// Passcode lifetime, attempt and send limits
#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Sends allowed per email per window
    #[serde(default = "default_send_limit")]
    pub send_limit: u32,

    #[serde(default = "default_send_window")]
    pub send_window_secs: u32,

    /// How often expired codes and rate-limit windows are swept
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl OtpConfig {
    pub fn policy(&self) -> OtpPolicy {
        OtpPolicy {
            ttl_secs: self.ttl_secs,
            max_attempts: self.max_attempts,
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidOtpSetting("ttl_secs"));
        }
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidOtpSetting("max_attempts"));
        }
        if self.send_limit == 0 || self.send_window_secs == 0 {
            return Err(ValidationError::InvalidOtpSetting("send_limit"));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidOtpSetting("sweep_interval_secs"));
        }
        Ok(())
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            max_attempts: default_max_attempts(),
            send_limit: default_send_limit(),
            send_window_secs: default_send_window(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_ttl() -> u64 {
    DEFAULT_OTP_TTL_SECS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_send_limit() -> u32 {
    3
}

fn default_send_window() -> u32 {
    600
}

fn default_sweep_interval() -> u64 {
    60
}

//! Rate limit configuration types.
//!
//! Limits are configured per resource; the key's scope and identifier pick
//! the counter, the resource picks the limit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ports::{RateLimitError, RateLimitKey, ADMIN_LOGIN_RESOURCE, OTP_SEND_RESOURCE};

/// Rate limits for a specific resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum requests per window.
    pub requests_per_window: u32,
    /// Window duration in seconds.
    pub window_secs: u32,
}

/// Complete rate limit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub resources: HashMap<String, ResourceLimits>,
}

impl RateLimitConfig {
    /// Empty configuration; every resource must be added explicitly.
    pub fn empty() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    pub fn with_resource(mut self, resource: &str, limits: ResourceLimits) -> Self {
        self.resources.insert(resource.to_string(), limits);
        self
    }

    /// Limit and window for `key`.
    pub fn limits_for(&self, key: &RateLimitKey) -> Result<(u32, u32), RateLimitError> {
        self.resources
            .get(&key.resource)
            .map(|r| (r.requests_per_window, r.window_secs))
            .ok_or_else(|| RateLimitError::UnknownResource(key.resource.clone()))
    }

    /// Longest configured window, used to bound how long state is kept.
    pub fn max_window_secs(&self) -> u32 {
        self.resources
            .values()
            .map(|r| r.window_secs)
            .max()
            .unwrap_or(0)
    }
}

impl Default for RateLimitConfig {
    /// Three OTP sends per ten minutes and ten admin sign-ins per fifteen.
    fn default() -> Self {
        Self::empty()
            .with_resource(
                OTP_SEND_RESOURCE,
                ResourceLimits {
                    requests_per_window: 3,
                    window_secs: 600,
                },
            )
            .with_resource(
                ADMIN_LOGIN_RESOURCE,
                ResourceLimits {
                    requests_per_window: 10,
                    window_secs: 900,
                },
            )
    }
}

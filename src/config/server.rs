//! HTTP listener settings.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for `request_timeout_secs`.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Where and how the API listens.
///
/// `MEMBER_DUES__SERVER__BIND_ADDR=127.0.0.1:3000` moves the listener;
/// `ALLOWED_ORIGINS` takes a comma-separated list for CORS.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub environment: Environment,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,
    pub request_timeout_secs: u64,
    pub allowed_origins: Option<String>,
}

/// Deployment environment. Production tightens secret and CORS checks.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            environment: Environment::Development,
            log_filter: "info,member_dues=debug,sqlx=warn".to_string(),
            request_timeout_secs: 30,
            allowed_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        self.bind_addr
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Non-blank entries of `allowed_origins`.
    pub fn allowed_origins(&self) -> Vec<&str> {
        self.allowed_origins
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.socket_addr()?;
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

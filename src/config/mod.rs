//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MEMBER_DUES` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use member_dues::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on {}", config.server.bind_addr);
//! ```

mod auth;
mod database;
mod email;
mod error;
mod otp;
mod payment;
mod periods;
mod redis;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use otp::OtpConfig;
pub use payment::PaymentConfig;
pub use periods::PeriodsConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Only the `auth` section is required; every other section has defaults
/// that run the service with in-memory storage and mock collaborators.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener, environment and log filter
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Redis configuration (OTP codes and rate limits)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Admin authentication
    pub auth: AuthConfig,

    /// Payment configuration (Razorpay)
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: EmailConfig,

    /// Tracked periods and fee
    #[serde(default)]
    pub periods: PeriodsConfig,

    /// Passcode limits
    #[serde(default)]
    pub otp: OtpConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEMBER_DUES` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEMBER_DUES__SERVER__BIND_ADDR=0.0.0.0:8080` -> `server.bind_addr`
    /// - `MEMBER_DUES__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEMBER_DUES")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = &self.server.environment;
        self.server.validate()?;
        self.database.validate()?;
        self.redis.validate()?;
        self.auth.validate(environment)?;
        self.payment.validate(environment)?;
        self.email.validate()?;
        self.periods.validate()?;
        self.otp.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MEMBER_DUES__AUTH__ADMIN_USERNAME",
        "MEMBER_DUES__AUTH__ADMIN_PASSWORD",
        "MEMBER_DUES__AUTH__JWT_SECRET",
        "MEMBER_DUES__SERVER__BIND_ADDR",
        "MEMBER_DUES__SERVER__ENVIRONMENT",
        "MEMBER_DUES__DATABASE__URL",
        "MEMBER_DUES__PERIODS__LAST_PERIOD",
        "MEMBER_DUES__OTP__MAX_ATTEMPTS",
    ];

    /// Helper to set environment variables for testing
    fn set_minimal_env() {
        env::set_var("MEMBER_DUES__AUTH__ADMIN_USERNAME", "treasurer");
        env::set_var("MEMBER_DUES__AUTH__ADMIN_PASSWORD", "s3cret");
        env::set_var("MEMBER_DUES__AUTH__JWT_SECRET", "dev-secret");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.auth.admin_username, "treasurer");
        assert_eq!(config.auth.jwt_secret.expose_secret(), "dev-secret");
        assert!(config.database.url().is_none());
        assert!(config.redis.url().is_none());
    }

    #[test]
    fn test_validate_minimal_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_auth_section_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_section_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.periods.first_period, 21);
        assert_eq!(config.periods.last_period, 28);
        assert_eq!(config.otp.ttl_secs, 300);
        assert_eq!(config.payment.currency, "INR");
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MEMBER_DUES__SERVER__BIND_ADDR", "3000");
        env::set_var("MEMBER_DUES__PERIODS__LAST_PERIOD", "30");
        env::set_var("MEMBER_DUES__OTP__MAX_ATTEMPTS", "3");
        env::set_var("MEMBER_DUES__DATABASE__URL", "postgresql://dues@localhost/dues");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.socket_addr().unwrap().port(), 3000);
        assert_eq!(config.periods.last_period, 30);
        assert_eq!(config.otp.max_attempts, 3);
        assert_eq!(config.database.url(), Some("postgresql://dues@localhost/dues"));
    }

    #[test]
    fn test_production_requires_payment_keys() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MEMBER_DUES__SERVER__ENVIRONMENT", "production");
        env::set_var(
            "MEMBER_DUES__AUTH__JWT_SECRET",
            "0123456789abcdef0123456789abcdef",
        );
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("PAYMENT__RAZORPAY_KEY_ID"))
        );
    }
}

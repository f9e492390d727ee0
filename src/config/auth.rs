//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Admin authentication configuration
///
/// A single administrator account signs in with these credentials and
/// receives an HS256 token signed with `jwt_secret`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Admin username
    pub admin_username: String,

    /// Admin password
    pub admin_password: SecretString,

    /// HMAC secret for session tokens
    pub jwt_secret: SecretString,

    /// Session token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    /// Sign-in attempts allowed per window
    #[serde(default = "default_login_limit")]
    pub login_limit: u32,

    /// Sign-in rate limit window in seconds
    #[serde(default = "default_login_window")]
    pub login_window_secs: u32,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Production requires a JWT secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.admin_username.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ADMIN_USERNAME"));
        }
        if self.admin_password.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ADMIN_PASSWORD"));
        }
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && self.jwt_secret.expose_secret().len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if !(300..=604_800).contains(&self.token_ttl_secs) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_token_ttl() -> u64 {
    8 * 3600
}

fn default_login_limit() -> u32 {
    10
}

fn default_login_window() -> u32 {
    900
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            admin_username: "treasurer".to_string(),
            admin_password: SecretString::new("s3cret".to_string()),
            jwt_secret: SecretString::new(secret.to_string()),
            token_ttl_secs: default_token_ttl(),
            login_limit: default_login_limit(),
            login_window_secs: default_login_window(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        let config = config("0123456789abcdef0123456789abcdef");
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_validation_missing_username() {
        let config = AuthConfig {
            admin_username: " ".to_string(),
            ..config("secret")
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = config("");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_validation_production_requires_long_secret() {
        let config = config("short");
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort)
        );
    }

    #[test]
    fn test_validation_token_ttl_bounds() {
        let config = AuthConfig {
            token_ttl_secs: 60,
            ..config("secret")
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidTokenTtl)
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", config("top-secret-value"));
        assert!(!debug.contains("top-secret-value"));
        assert!(!debug.contains("s3cret"));
    }
}

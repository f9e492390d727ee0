//! Member storage settings.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// PostgreSQL pool settings. Without a URL members live in process memory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Apply `migrations/` before serving.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    /// Connection URL, if PostgreSQL storage is configured.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.url() {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ValidationError::InvalidDatabaseUrl);
            }
        }
        if !(1..=50).contains(&self.max_connections) {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_unless_url_set() {
        assert!(DatabaseConfig::default().url().is_none());

        let blank = DatabaseConfig {
            url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.url().is_none());
        assert!(blank.validate().is_ok());
    }

    #[test]
    fn only_postgres_urls_are_accepted() {
        let config = DatabaseConfig {
            url: Some("mysql://localhost/dues".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));

        let config = DatabaseConfig {
            url: Some(" postgres://dues@localhost/dues ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.url(), Some("postgres://dues@localhost/dues"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn pool_needs_between_one_and_fifty_connections() {
        for (size, ok) in [(0, false), (1, true), (50, true), (51, false)] {
            let config = DatabaseConfig {
                max_connections: size,
                ..Default::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "pool size {}", size);
        }
    }
}

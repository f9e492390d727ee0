//! Payment configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment configuration (Razorpay)
///
/// Without keys outside production the mock gateway is used.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id, shared with checkout clients
    pub razorpay_key_id: Option<String>,

    /// Razorpay key secret
    pub razorpay_key_secret: Option<SecretString>,

    /// ISO currency code for orders
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PaymentConfig {
    /// Key pair, when both halves are configured
    pub fn razorpay_keys(&self) -> Option<(&str, &SecretString)> {
        match (self.razorpay_key_id.as_deref(), self.razorpay_key_secret.as_ref()) {
            (Some(id), Some(secret)) if !id.trim().is_empty() => Some((id.trim(), secret)),
            _ => None,
        }
    }

    /// Check if using Razorpay test keys
    pub fn is_test_mode(&self) -> bool {
        self.razorpay_key_id
            .as_deref()
            .is_some_and(|k| k.starts_with("rzp_test_"))
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let has_id = self.razorpay_key_id.as_deref().is_some_and(|k| !k.trim().is_empty());
        let has_secret = self.razorpay_key_secret.is_some();

        if has_id != has_secret {
            return Err(ValidationError::IncompleteRazorpayKeys);
        }
        if !has_id && *environment == Environment::Production {
            return Err(ValidationError::MissingRequired("PAYMENT__RAZORPAY_KEY_ID"));
        }
        if has_id && !self.razorpay_key_id.as_deref().is_some_and(|k| k.trim().starts_with("rzp_")) {
            return Err(ValidationError::InvalidRazorpayKey);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            razorpay_key_id: None,
            razorpay_key_secret: None,
            currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

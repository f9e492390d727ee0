//! Razorpay payment gateway adapter.
//!
//! Creates and fetches orders through the Orders API and verifies
//! checkout signatures.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Key secret held as `secrecy::SecretString`
//!
//! Razorpay amounts are in the smallest currency unit (paise); the port
//! speaks whole units, so amounts are scaled at this boundary.

use std::collections::BTreeMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{
    CreateOrderRequest, GatewayOrder, PaymentError, PaymentErrorCode, PaymentGateway,
};

use super::signature::signature_matches;

/// Smallest currency units per whole unit.
const SUBUNITS_PER_UNIT: i64 = 100;

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    key_id: String,
    key_secret: SecretString,
    api_base_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Body of `POST /v1/orders`.
#[derive(Debug, Serialize)]
struct OrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    notes: &'a BTreeMap<String, String>,
}

/// Order as returned by Razorpay.
#[derive(Debug, Deserialize)]
struct RazorpayOrder {
    id: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    receipt: Option<String>,
    #[serde(default)]
    notes: Option<RazorpayNotes>,
}

/// Razorpay sends `[]` rather than `{}` for an order without notes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RazorpayNotes {
    Map(BTreeMap<String, String>),
    Empty(Vec<serde_json::Value>),
}

impl RazorpayOrder {
    fn into_gateway_order(self) -> GatewayOrder {
        let notes = match self.notes {
            Some(RazorpayNotes::Map(notes)) => notes,
            Some(RazorpayNotes::Empty(_)) | None => BTreeMap::new(),
        };
        GatewayOrder {
            id: self.id,
            amount: self.amount / SUBUNITS_PER_UNIT,
            currency: self.currency,
            receipt: self.receipt.unwrap_or_default(),
            notes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorBody {
    error: RazorpayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorDetail {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

/// Razorpay payment gateway adapter.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn error_from_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
        let code = match status {
            reqwest::StatusCode::UNAUTHORIZED => PaymentErrorCode::AuthenticationError,
            reqwest::StatusCode::TOO_MANY_REQUESTS => PaymentErrorCode::RateLimitExceeded,
            s if s.is_client_error() => PaymentErrorCode::InvalidRequest,
            _ => PaymentErrorCode::ProviderError,
        };

        match serde_json::from_str::<RazorpayErrorBody>(body) {
            Ok(parsed) => PaymentError::new(
                code,
                parsed
                    .error
                    .description
                    .unwrap_or_else(|| format!("Razorpay API error ({})", status)),
            )
            .with_provider_code(parsed.error.code),
            Err(_) => PaymentError::new(code, format!("Razorpay API error ({}): {}", status, body)),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<GatewayOrder, PaymentError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);
        let body = OrderBody {
            amount: request.amount * SUBUNITS_PER_UNIT,
            currency: &request.currency,
            receipt: &request.receipt,
            notes: &request.notes,
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Razorpay create_order failed");
            return Err(Self::error_from_response(status, &error_text));
        }

        let order: RazorpayOrder = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Razorpay response: {}", e))
        })?;

        tracing::info!(order_id = %order.id, amount = order.amount, "Razorpay order created");

        Ok(order.into_gateway_order())
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, PaymentError> {
        let url = format!("{}/v1/orders/{}", self.config.api_base_url, order_id);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, order_id, "Razorpay fetch_order failed");
            return Err(Self::error_from_response(status, &error_text));
        }

        let order: RazorpayOrder = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Razorpay response: {}", e))
        })?;

        Ok(order.into_gateway_order())
    }

    fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), PaymentError> {
        if signature_matches(
            self.config.key_secret.expose_secret(),
            order_id,
            payment_id,
            signature,
        ) {
            Ok(())
        } else {
            tracing::warn!(order_id, payment_id, "Invalid payment signature");
            Err(PaymentError::invalid_signature())
        }
    }

    fn key_id(&self) -> &str {
        &self.config.key_id
    }
}

//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` port:
//! - Order creation through the Orders API
//! - Checkout signature verification
//!
//! # Security
//!
//! - Signatures use HMAC-SHA256 with constant-time comparison
//! - The key secret is handled via `secrecy::SecretString`

mod mock_gateway;
mod razorpay_adapter;
mod signature;

pub use mock_gateway::{MockPaymentGateway, MOCK_KEY_SECRET};
pub use razorpay_adapter::{RazorpayConfig, RazorpayGateway};
pub use signature::{payment_signature, signature_matches};

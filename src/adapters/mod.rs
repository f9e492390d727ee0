//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` / `storage` - Member persistence (PostgreSQL, in-memory)
//! - `otp` / `rate_limiter` - Short-lived state (Redis, in-memory)
//! - `razorpay` - Payment gateway
//! - `email` - Passcode delivery
//! - `auth` - Admin session tokens
//! - `http` - REST API

pub mod auth;
pub mod email;
pub mod http;
pub mod otp;
pub mod postgres;
pub mod rate_limiter;
pub mod razorpay;
pub mod storage;

pub use auth::JwtSessions;
pub use email::{LoggingEmailSender, ResendConfig, ResendEmailSender};
pub use otp::{InMemoryOtpStore, RedisOtpStore};
pub use postgres::{PostgresMemberReader, PostgresMemberRepository};
pub use rate_limiter::{InMemoryRateLimiter, RateLimitConfig, RedisRateLimiter};
pub use razorpay::{MockPaymentGateway, RazorpayConfig, RazorpayGateway};
pub use storage::InMemoryMemberStore;

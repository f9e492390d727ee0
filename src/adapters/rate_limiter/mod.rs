//! Rate limiter adapters.
//!
//! Implementations of the RateLimiter port for different backends.
//!
//! ## Available Adapters
//!
//! - `InMemoryRateLimiter` - Single process, swept by the background task
//! - `RedisRateLimiter` - Redis-backed, shared between processes
//!
//! ## Usage
//!
//! ```ignore
//! use member_dues::adapters::rate_limiter::{InMemoryRateLimiter, RateLimitConfig};
//!
//! let limiter = InMemoryRateLimiter::new(RateLimitConfig::default());
//! let result = limiter.check(RateLimitKey::otp_send(email), Timestamp::now()).await?;
//! ```

mod config;
mod in_memory;
mod redis;

pub use config::{RateLimitConfig, ResourceLimits};
pub use in_memory::InMemoryRateLimiter;
pub use self::redis::RedisRateLimiter;

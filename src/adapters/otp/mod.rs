//! OTP store adapters.
//!
//! - `InMemoryOtpStore` - Single process, swept by the background task
//! - `RedisOtpStore` - Redis with native TTL

mod in_memory;
mod redis;

pub use in_memory::InMemoryOtpStore;
pub use self::redis::RedisOtpStore;

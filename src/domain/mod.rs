//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `membership` - Members, payment records and the dues engine
//! - `otp` - One-time passcode verification rules

pub mod foundation;
pub mod membership;
pub mod otp;

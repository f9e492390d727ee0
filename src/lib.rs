//! Member Dues - Membership Fee Collection
//!
//! Tracks what each member owes per fiscal period, lets members verify by
//! emailed passcode and pay the oldest dues first through Razorpay, and
//! gives administrators member management and collection reports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

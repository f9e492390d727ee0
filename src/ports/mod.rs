//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Member Ports
//!
//! - `MemberRepository` - Member persistence and payment writes
//! - `MemberReader` - Lookup, listings and report queries
//!
//! ## Collaborator Ports
//!
//! - `PaymentGateway` - Hosted checkout orders and signature checks
//! - `EmailSender` - Outbound email
//! - `SessionIssuer` / `SessionValidator` - Admin bearer tokens
//!
//! ## Ephemeral State Ports
//!
//! - `OtpStore` - Issued one-time passcodes
//! - `RateLimiter` - Fixed-window request quotas

mod email_sender;
mod member_reader;
mod member_repository;
mod otp_store;
mod payment_gateway;
mod rate_limiter;
mod session_validator;

pub use email_sender::{EmailError, EmailMessage, EmailSender};
pub use member_reader::{
    MemberFilter, MemberPage, MemberReader, MemberSummary, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use member_repository::MemberRepository;
pub use otp_store::OtpStore;
pub use payment_gateway::{
    CreateOrderRequest, GatewayOrder, PaymentError, PaymentErrorCode, PaymentGateway,
};
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitScope,
    RateLimitStatus, RateLimiter, ADMIN_LOGIN_RESOURCE, OTP_SEND_RESOURCE,
};
pub use session_validator::{IssuedSession, SessionIssuer, SessionValidator};

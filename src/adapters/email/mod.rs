//! Email sender adapters.
//!
//! - `ResendEmailSender` - Delivery through the Resend API
//! - `LoggingEmailSender` - Logs and records messages (development/testing)

mod logging;
mod resend;

pub use logging::LoggingEmailSender;
pub use resend::{ResendConfig, ResendEmailSender};

//! Email sender that logs instead of delivering.
//!
//! Used when no email provider is configured. Sent messages are kept in
//! memory so tests and local runs can read the passcode back.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{EmailError, EmailMessage, EmailSender};

#[derive(Debug, Clone, Default)]
pub struct LoggingEmailSender {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl LoggingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Most recent message addressed to `to`.
    pub fn last_to(&self, to: &str) -> Option<EmailMessage> {
        self.sent()
            .into_iter()
            .rev()
            .find(|m| m.to.eq_ignore_ascii_case(to))
    }
}

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        tracing::info!(to = %message.to, subject = %message.subject, "Email not delivered (logging sender)");
        self.sent
            .lock()
            .map_err(|_| EmailError::Transport("sent log poisoned".to_string()))?
            .push(message);
        Ok(())
    }
}

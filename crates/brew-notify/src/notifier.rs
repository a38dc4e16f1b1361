//! # Email Senders
//!
//! The [`EmailNotifier`] seam and the two senders that never touch the
//! network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{NotifyError, NotifyResult};
use crate::message::{DeliveryReceipt, EmailMessage};

/// Sends one rendered email.
#[async_trait]
pub trait EmailNotifier: Send + Sync + std::fmt::Debug {
    /// Hands `message` to the provider. One attempt, no retries.
    async fn send(&self, message: &EmailMessage) -> NotifyResult<DeliveryReceipt>;

    /// Short sender name for logs (`resend`, `log`, `memory`).
    fn name(&self) -> &'static str;
}

// =============================================================================
// Log Notifier
// =============================================================================

/// Development sender: logs the message and reports success.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl EmailNotifier for LogNotifier {
    async fn send(&self, message: &EmailMessage) -> NotifyResult<DeliveryReceipt> {
        let id = format!("log_{}", Uuid::new_v4());
        info!(
            message_id = %id,
            to = %message.to,
            reply_to = message.reply_to.as_deref().unwrap_or(""),
            subject = %message.subject,
            "Email not delivered (log sender)"
        );
        Ok(DeliveryReceipt { id })
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

// =============================================================================
// Memory Notifier
// =============================================================================

/// Records every message it is given. Can be switched to fail.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<EmailMessage>>,
    failing: AtomicBool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every `send` fails.
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.set_failing(true);
        notifier
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Messages accepted so far, oldest first.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl EmailNotifier for MemoryNotifier {
    async fn send(&self, message: &EmailMessage) -> NotifyResult<DeliveryReceipt> {
        if self.failing.load(Ordering::SeqCst) {
            warn!(to = %message.to, subject = %message.subject, "Simulated email failure");
            return Err(NotifyError::Simulated(format!("could not send to {}", message.to)));
        }

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());

        Ok(DeliveryReceipt {
            id: format!("memory_{}", Uuid::new_v4()),
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage::new("Shop <noreply@shop.test>", "jo@example.com", "Hello", "<p>Hello</p>")
    }

    #[tokio::test]
    async fn test_memory_notifier_records() {
        let notifier = MemoryNotifier::new();
        let receipt = notifier.send(&message()).await.unwrap();

        assert!(receipt.id.starts_with("memory_"));
        assert_eq!(notifier.sent(), vec![message()]);
    }

    #[tokio::test]
    async fn test_memory_notifier_failing() {
        let notifier = MemoryNotifier::failing();
        assert!(matches!(notifier.send(&message()).await, Err(NotifyError::Simulated(_))));
        assert!(notifier.sent().is_empty());

        notifier.set_failing(false);
        assert!(notifier.send(&message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_log_notifier_succeeds() {
        let receipt = LogNotifier.send(&message()).await.unwrap();
        assert!(receipt.id.starts_with("log_"));
        assert_eq!(LogNotifier.name(), "log");
    }
}

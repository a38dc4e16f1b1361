//! # Notifier State
//!
//! The configured email sender, the store identity that fills the
//! templates, and how long a command waits for one send.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [email] provider = "resend"  ──►  ResendNotifier (api_key, base_url)   │
//! │  [email] provider = "log"     ──►  LogNotifier                          │
//! │  tests                        ──►  NotifierState::new(MemoryNotifier)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use brew_notify::{
    DeliveryReceipt, EmailMessage, EmailNotifier, LogNotifier, NotifyError, NotifyResult,
    ResendConfig, ResendNotifier, StoreIdentity,
};
use tracing::{debug, info};

use super::config::{EmailProvider, StorefrontConfig};

#[derive(Debug, Clone)]
pub struct NotifierState {
    notifier: Arc<dyn EmailNotifier>,
    store: StoreIdentity,
    timeout: Duration,
}

impl NotifierState {
    pub fn new(notifier: Arc<dyn EmailNotifier>, store: StoreIdentity, timeout: Duration) -> Self {
        NotifierState {
            notifier,
            store,
            timeout,
        }
    }

    /// Builds the sender named by `[email] provider`.
    pub fn from_config(config: &StorefrontConfig) -> NotifyResult<Self> {
        let notifier: Arc<dyn EmailNotifier> = match config.email.provider {
            EmailProvider::Resend => {
                let api_key = config.email.api_key.clone().unwrap_or_default();
                Arc::new(ResendNotifier::new(ResendConfig {
                    base_url: config.email.api_base_url.clone(),
                    api_key,
                })?)
            }
            EmailProvider::Log => Arc::new(LogNotifier),
        };
        info!(sender = notifier.name(), "Email sender ready");

        Ok(Self::new(
            notifier,
            config.store.identity(),
            config.notification_timeout(),
        ))
    }

    /// Store identity used by the templates.
    pub fn store(&self) -> &StoreIdentity {
        &self.store
    }

    /// Sends one message, giving up after the configured timeout.
    pub async fn deliver(&self, message: &EmailMessage) -> NotifyResult<DeliveryReceipt> {
        debug!(sender = self.notifier.name(), to = %message.to, subject = %message.subject, "Sending email");

        match tokio::time::timeout(self.timeout, self.notifier.send(message)).await {
            Ok(result) => result,
            Err(_) => Err(NotifyError::Timeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use brew_notify::MemoryNotifier;

    /// A sender that never answers.
    #[derive(Debug)]
    struct StalledNotifier;

    #[async_trait]
    impl EmailNotifier for StalledNotifier {
        async fn send(&self, _message: &EmailMessage) -> NotifyResult<DeliveryReceipt> {
            std::future::pending().await
        }

        fn name(&self) -> &'static str {
            "stalled"
        }
    }

    fn message() -> EmailMessage {
        EmailMessage::new("shop@shop.test", "jo@example.com", "Hi", "<p/>")
    }

    #[tokio::test]
    async fn test_deliver_passes_through() {
        let memory = Arc::new(MemoryNotifier::new());
        let state = NotifierState::new(memory.clone(), StoreIdentity::default(), Duration::from_secs(1));

        state.deliver(&message()).await.unwrap();
        assert_eq!(memory.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_deliver_times_out() {
        let state = NotifierState::new(
            Arc::new(StalledNotifier),
            StoreIdentity::default(),
            Duration::from_millis(20),
        );

        assert!(matches!(state.deliver(&message()).await, Err(NotifyError::Timeout(_))));
    }

    #[test]
    fn test_from_config_picks_sender() {
        let config = StorefrontConfig::default();
        let state = NotifierState::from_config(&config).unwrap();
        assert_eq!(state.notifier.name(), "log");

        let mut config = StorefrontConfig::default();
        config.email.provider = EmailProvider::Resend;
        config.email.api_key = Some("re_123".to_string());
        let state = NotifierState::from_config(&config).unwrap();
        assert_eq!(state.notifier.name(), "resend");
    }
}

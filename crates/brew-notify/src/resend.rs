//! Resend HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NotifyError, NotifyResult};
use crate::message::{DeliveryReceipt, EmailMessage};
use crate::notifier::EmailNotifier;

/// Public Resend API endpoint.
pub const RESEND_API_BASE: &str = "https://api.resend.com";

/// Configuration for the Resend sender.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API base URL, e.g. `"https://api.resend.com"`.
    pub base_url: String,

    /// Resend API key (`re_...`).
    pub api_key: String,
}

/// Sends email through the Resend REST API.
#[derive(Debug, Clone)]
pub struct ResendNotifier {
    config: ResendConfig,
    http: Client,
}

impl ResendNotifier {
    /// Create a sender from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `Misconfigured` when the API key is empty.
    pub fn new(config: ResendConfig) -> NotifyResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(NotifyError::Misconfigured("Resend API key is empty".to_string()));
        }

        Ok(Self {
            config,
            http: Client::new(),
        })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmailNotifier for ResendNotifier {
    async fn send(&self, message: &EmailMessage) -> NotifyResult<DeliveryReceipt> {
        let body = SendEmailRequest {
            from: &message.from,
            to: [message.to.as_str()],
            reply_to: message.reply_to.as_deref(),
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .http
            .post(self.emails_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            return Err(NotifyError::Rejected { status, body });
        }

        let parsed: SendEmailResponse = response.json().await?;
        debug!(message_id = %parsed.id, to = %message.to, "Email accepted by Resend");

        Ok(DeliveryReceipt { id: parsed.id })
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ResendConfig {
        ResendConfig {
            base_url: base_url.to_string(),
            api_key: "re_test".to_string(),
        }
    }

    #[test]
    fn test_rejects_empty_api_key() {
        let result = ResendNotifier::new(ResendConfig {
            base_url: RESEND_API_BASE.to_string(),
            api_key: "  ".to_string(),
        });
        assert!(matches!(result, Err(NotifyError::Misconfigured(_))));
    }

    #[test]
    fn test_emails_url_joins_cleanly() {
        let notifier = ResendNotifier::new(config("https://api.resend.com/")).unwrap();
        assert_eq!(notifier.emails_url(), "https://api.resend.com/emails");
    }

    #[test]
    fn test_request_body_shape() {
        let message = EmailMessage::new("Shop <noreply@shop.test>", "support@shop.test", "Hi", "<p/>")
            .reply_to("jo@example.com");
        let body = SendEmailRequest {
            from: &message.from,
            to: [message.to.as_str()],
            reply_to: message.reply_to.as_deref(),
            subject: &message.subject,
            html: &message.html,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["to"][0], "support@shop.test");
        assert_eq!(json["reply_to"], "jo@example.com");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_an_error() {
        // Port 9 (discard) on localhost is not an HTTP server.
        let notifier = ResendNotifier::new(config("http://127.0.0.1:9")).unwrap();
        let message = EmailMessage::new("a@shop.test", "b@shop.test", "Hi", "<p/>");

        assert!(notifier.send(&message).await.is_err());
    }
}

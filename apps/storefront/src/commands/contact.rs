//! # Contact & Newsletter Commands
//!
//! ```text
//! submit_contact        ──► support inbox (reply-to: customer)
//!                       ──► confirmation to the customer
//! subscribe_newsletter  ──► welcome email with the WELCOME10 code
//! ```
//!
//! Unlike checkout, these forms exist only to send email, so a failed send
//! is the command's error (`NOTIFICATION_ERROR`).

use brew_core::{ContactForm, NewsletterSignup};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::NotifierState;

/// Shown in place of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAccepted {
    pub title: String,
    pub message: String,
}

pub async fn submit_contact(notifier: &NotifierState, form: ContactForm) -> Result<FormAccepted, ApiError> {
    debug!(subject = %form.subject, "submit_contact command");

    let form = form.validate().map_err(ApiError::form)?;
    let today = Utc::now().date_naive();
    let store = notifier.store();

    notifier.deliver(&store.contact_to_support(&form, today)).await?;
    notifier.deliver(&store.contact_confirmation(&form, today)).await?;
    info!(subject = %form.subject, "Contact message relayed to support");

    Ok(FormAccepted {
        title: "Thank you for your message!".to_string(),
        message: "We've received your inquiry and will get back to you as soon as possible."
            .to_string(),
    })
}

pub async fn subscribe_newsletter(
    notifier: &NotifierState,
    signup: NewsletterSignup,
) -> Result<FormAccepted, ApiError> {
    debug!("subscribe_newsletter command");

    let email = signup.validate().map_err(ApiError::form)?;
    let today = Utc::now().date_naive();

    notifier
        .deliver(&notifier.store().newsletter_confirmation(&email, today))
        .await?;
    info!("Newsletter subscription confirmed");

    Ok(FormAccepted {
        title: "Thanks for subscribing!".to_string(),
        message: format!("A welcome email is on its way to {}.", email),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use brew_notify::{MemoryNotifier, StoreIdentity};
    use std::sync::Arc;
    use std::time::Duration;

    fn notifier(memory: &Arc<MemoryNotifier>) -> NotifierState {
        NotifierState::new(memory.clone(), StoreIdentity::default(), Duration::from_secs(1))
    }

    fn contact() -> ContactForm {
        ContactForm {
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            subject: "Wholesale".to_string(),
            message: "Do you sell 5kg bags?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_contact_sends_both_emails() {
        let memory = Arc::new(MemoryNotifier::new());
        submit_contact(&notifier(&memory), contact()).await.unwrap();

        let sent = memory.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "support@beanandbrew.com");
        assert_eq!(sent[0].reply_to.as_deref(), Some("jo@example.com"));
        assert_eq!(sent[1].to, "jo@example.com");
    }

    #[tokio::test]
    async fn test_contact_validation_sends_nothing() {
        let memory = Arc::new(MemoryNotifier::new());
        let mut form = contact();
        form.email = "not-an-email".to_string();
        form.message = " ".to_string();

        let err = submit_contact(&notifier(&memory), form).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        let fields = err.fields.unwrap();
        assert_eq!(fields.get("email").unwrap().to_string(), "Invalid email address");
        assert_eq!(fields.get("message").unwrap().to_string(), "Message is required");
        assert!(memory.sent().is_empty());
    }

    #[tokio::test]
    async fn test_contact_send_failure_is_reported() {
        let memory = Arc::new(MemoryNotifier::failing());
        let err = submit_contact(&notifier(&memory), contact()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotificationError);
    }

    #[tokio::test]
    async fn test_newsletter_signup() {
        let memory = Arc::new(MemoryNotifier::new());
        let signup = NewsletterSignup {
            email: " jo@example.com ".to_string(),
        };

        let accepted = subscribe_newsletter(&notifier(&memory), signup).await.unwrap();

        assert!(accepted.message.contains("jo@example.com"));
        let sent = memory.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jo@example.com");
        assert!(sent[0].html.contains("WELCOME10"));
    }

    #[tokio::test]
    async fn test_newsletter_rejects_bad_email() {
        let memory = Arc::new(MemoryNotifier::new());
        let signup = NewsletterSignup {
            email: "jo@".to_string(),
        };

        let err = subscribe_newsletter(&notifier(&memory), signup).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(memory.sent().is_empty());
    }
}

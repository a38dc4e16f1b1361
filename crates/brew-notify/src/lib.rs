//! # brew-notify: Transactional Email
//!
//! Order confirmations, contact form relays and newsletter welcomes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout / submit_contact / subscribe_newsletter                       │
//! │       │                                                                 │
//! │       │  templates::order_confirmation(...) ──► EmailMessage            │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              dyn EmailNotifier (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ResendNotifier ──► POST {base_url}/emails   (production)      │   │
//! │  │   LogNotifier    ──► tracing::info!           (development)     │   │
//! │  │   MemoryNotifier ──► Vec<EmailMessage>        (tests)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Senders never retry. Callers decide what a failure means.
//!
//! ## Usage
//! ```rust
//! use brew_notify::{EmailMessage, EmailNotifier, MemoryNotifier};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), brew_notify::NotifyError> {
//! let notifier = MemoryNotifier::new();
//! let message = EmailMessage::new("Shop <noreply@shop.test>", "jo@example.com", "Hi", "<p>Hi</p>");
//!
//! notifier.send(&message).await?;
//! assert_eq!(notifier.sent().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod message;
pub mod notifier;
pub mod resend;
pub mod templates;

pub use error::{NotifyError, NotifyResult};
pub use message::{DeliveryReceipt, EmailMessage};
pub use notifier::{EmailNotifier, LogNotifier, MemoryNotifier};
pub use resend::{ResendConfig, ResendNotifier, RESEND_API_BASE};
pub use templates::StoreIdentity;

//! # Notification Errors

use std::time::Duration;

use thiserror::Error;

/// Email delivery errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport failure or an undecodable response body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("email provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The sender is not usable as configured (missing API key, ...).
    #[error("email sender misconfigured: {0}")]
    Misconfigured(String),

    /// The provider did not answer in time.
    #[error("email provider did not answer within {0:?}")]
    Timeout(Duration),

    /// Failure injected by a test sender.
    #[error("simulated email failure: {0}")]
    Simulated(String),
}

/// Result type for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

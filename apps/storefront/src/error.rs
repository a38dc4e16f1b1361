//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Page layer                  Rust engine                                │
//! │  ──────────                  ───────────                                │
//! │                                                                         │
//! │  {"cmd":"checkout",...}                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  ──►  Result<T, ApiError>                      │  │
//! │  │                                                                  │  │
//! │  │  CoreError::InvalidForm(..)  ──► VALIDATION_ERROR + fields       │  │
//! │  │  CoreError::ProductNotFound  ──► NOT_FOUND                       │  │
//! │  │  SessionError                ──► SESSION_ERROR                   │  │
//! │  │  NotifyError                 ──► NOTIFICATION_ERROR              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  {"error":{"code":"VALIDATION_ERROR","message":"...",                   │
//! │            "fields":{"zipCode":"Valid ZIP code is required"}}}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brew_core::{CoreError, FormErrors};
use brew_notify::NotifyError;
use brew_session::SessionError;
use serde::Serialize;
use thiserror::Error;

use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages for form submissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FormErrors>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed, or the command itself was malformed
    ValidationError,

    /// Operation needs a non-empty cart
    CartEmpty,

    /// Session storage failed
    SessionError,

    /// Email could not be sent
    NotificationError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a validation error carrying every failing field.
    pub fn form(errors: FormErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: errors.to_string(),
            fields: Some(errors),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartEmpty, "Your cart is empty"),
            CoreError::InvalidForm(errors) => ApiError::form(errors),
            CoreError::InvalidTransition { .. } => {
                tracing::error!("Checkout state error: {}", err);
                ApiError::internal(err.to_string())
            }
            CoreError::InvalidCatalog(ref message) => {
                tracing::error!("Catalog error: {}", message);
                ApiError::internal("Catalog is unavailable")
            }
        }
    }
}

/// Converts session storage errors to API errors.
impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        tracing::error!("Session storage failed: {}", err);
        ApiError::new(ErrorCode::SessionError, err.to_string())
    }
}

/// Converts email errors to API errors.
impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        ApiError::new(ErrorCode::NotificationError, err.to_string())
    }
}

/// Converts serialization failures of command output.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Failed to encode response: {}", err);
        ApiError::internal("Failed to encode response")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Error
// =============================================================================

/// Errors that stop the storefront before it accepts commands.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("catalog: {0}")]
    Catalog(#[from] CoreError),

    #[error("email sender: {0}")]
    Notifier(#[from] NotifyError),

    #[error("command channel: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::ValidationError;

    #[test]
    fn test_form_errors_carry_fields() {
        let mut errors = FormErrors::new();
        errors.push(ValidationError::InvalidEmail {
            field: "email".to_string(),
        });
        let api: ApiError = CoreError::InvalidForm(errors).into();

        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["fields"]["email"], "Invalid email address");
    }

    #[test]
    fn test_codes() {
        assert_eq!(ApiError::from(CoreError::ProductNotFound(42)).code, ErrorCode::NotFound);
        assert_eq!(ApiError::from(CoreError::EmptyCart).code, ErrorCode::CartEmpty);
        assert_eq!(
            ApiError::from(NotifyError::Simulated("down".into())).code,
            ErrorCode::NotificationError
        );
        assert_eq!(
            ApiError::from(SessionError::Encode {
                key: "lastReceipt".into(),
                message: "bad".into(),
            })
            .code,
            ErrorCode::SessionError
        );
    }

    #[test]
    fn test_plain_errors_omit_fields() {
        let json = serde_json::to_value(ApiError::not_found("Product", 7)).unwrap();
        assert_eq!(json["message"], "Product not found: 7");
        assert!(json.get("fields").is_none());
    }
}

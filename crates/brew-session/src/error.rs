//! # Session Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  serde_json::Error                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionError (this module) ← Adds the key that failed                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront app) ← Serialized for the page layer           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Session storage errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A stored value could not be decoded.
    ///
    /// ## When This Occurs
    /// - The value was written by an older layout
    /// - The value was edited by hand
    #[error("Stored value under '{key}' is unreadable: {message}")]
    Corrupt { key: String, message: String },

    /// A value could not be encoded for storage.
    #[error("Could not encode value for '{key}': {message}")]
    Encode { key: String, message: String },
}

impl SessionError {
    pub fn corrupt(key: impl Into<String>, err: serde_json::Error) -> Self {
        SessionError::Corrupt {
            key: key.into(),
            message: err.to_string(),
        }
    }

    pub fn encode(key: impl Into<String>, err: serde_json::Error) -> Self {
        SessionError::Encode {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

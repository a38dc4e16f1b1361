//! # Session State
//!
//! Wraps the shopper's `Session` for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub fn view_receipt(session: &SessionState) -> Result<ReceiptView, ApiError> {
//!     let receipt = session.inner().receipts().load()?;
//!     ...
//! }
//! ```

use brew_session::Session;

/// Wrapper around `Session` for state management.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Session,
}

impl SessionState {
    pub fn new(session: Session) -> Self {
        SessionState { session }
    }

    /// Returns a reference to the inner Session.
    pub fn inner(&self) -> &Session {
        &self.session
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Session::in_memory())
    }
}

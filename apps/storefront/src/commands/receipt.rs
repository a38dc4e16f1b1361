//! # Receipt Command
//!
//! Shows the order placed last in this session. Without one the page goes
//! back home; that is a missing precondition, not an error.

use brew_core::{OrderRecord, View};
use brew_session::SessionError;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::SessionState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ReceiptView {
    Receipt { order: OrderRecord },
    Redirect { view: View },
}

/// Reads `lastReceipt`.
///
/// An unreadable stored value is treated like a missing one.
pub fn view_receipt(session: &SessionState) -> Result<ReceiptView, ApiError> {
    debug!("view_receipt command");

    match session.inner().receipts().load() {
        Ok(Some(order)) => Ok(ReceiptView::Receipt { order }),
        Ok(None) => Ok(ReceiptView::Redirect { view: View::Home }),
        Err(SessionError::Corrupt { key, message }) => {
            warn!(key = %key, error = %message, "Stored receipt is unreadable, redirecting home");
            Ok(ReceiptView::Redirect { view: View::Home })
        }
        Err(e) => Err(e.into()),
    }
}

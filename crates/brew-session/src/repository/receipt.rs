//! # Receipt Repository
//!
//! Stores the most recent order record under `lastReceipt`.
//!
//! ## Receipt Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout succeeds ──► save()   overwrites whatever was stored          │
//! │  receipt page      ──► load()   None means "redirect home"              │
//! │  next checkout     ──► save()   the old receipt is gone                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use brew_core::OrderRecord;
use tracing::debug;

use crate::error::{SessionError, SessionResult};
use crate::storage::SessionStorage;

/// Storage key of the last receipt.
pub const LAST_RECEIPT_KEY: &str = "lastReceipt";

/// Repository for the stored receipt.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    storage: Arc<dyn SessionStorage>,
}

impl ReceiptRepository {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        ReceiptRepository { storage }
    }

    /// Stores `record`, replacing the previous receipt.
    pub fn save(&self, record: &OrderRecord) -> SessionResult<()> {
        let json = serde_json::to_string(record).map_err(|e| SessionError::encode(LAST_RECEIPT_KEY, e))?;
        self.storage.set_item(LAST_RECEIPT_KEY, json)?;

        debug!(order_id = %record.id, "Receipt stored");
        Ok(())
    }

    /// The stored receipt, if any.
    ///
    /// ## Errors
    /// `Corrupt` when a value is stored but cannot be decoded.
    pub fn load(&self) -> SessionResult<Option<OrderRecord>> {
        let Some(json) = self.storage.get_item(LAST_RECEIPT_KEY)? else {
            return Ok(None);
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| SessionError::corrupt(LAST_RECEIPT_KEY, e))
    }

    pub fn clear(&self) -> SessionResult<()> {
        self.storage.remove_item(LAST_RECEIPT_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;
    use brew_core::{Cart, Money, OrderId, PaymentMethod, Product, ShippingAddress, ValidCheckout};
    use chrono::{TimeZone, Utc};

    fn record(id: &str, quantity: i64) -> OrderRecord {
        let mut cart = Cart::new();
        cart.add(&Product::new(1, "House Blend", Money::from_cents(1250), "coffee"), quantity);

        let checkout = ValidCheckout {
            email: "ada@example.com".to_string(),
            shipping_address: ShippingAddress {
                name: "Ada Lovelace".to_string(),
                address: "12 Roast Lane".to_string(),
                city: "Portland".to_string(),
                state: "OR".to_string(),
                zip_code: "97201".to_string(),
                country: "USA".to_string(),
            },
            payment_method: PaymentMethod::CreditCard,
        };

        let id: OrderId = serde_json::from_value(serde_json::json!(id)).unwrap();
        let date = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        OrderRecord::from_cart(id, date, &cart, &checkout).unwrap()
    }

    #[test]
    fn test_load_without_receipt() {
        let session = Session::in_memory();
        assert!(session.receipts().load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let session = Session::in_memory();
        let receipt = record("INV-482913", 2);

        session.receipts().save(&receipt).unwrap();

        assert_eq!(session.receipts().load().unwrap(), Some(receipt));
        let raw = session.storage().get_item(LAST_RECEIPT_KEY).unwrap().unwrap();
        assert!(raw.contains("\"shippingAddress\""));
    }

    #[test]
    fn test_next_save_overwrites() {
        let session = Session::in_memory();
        session.receipts().save(&record("INV-100000", 1)).unwrap();
        session.receipts().save(&record("INV-200000", 3)).unwrap();

        let loaded = session.receipts().load().unwrap().unwrap();
        assert_eq!(loaded.id.as_str(), "INV-200000");
        assert_eq!(loaded.total_items(), 3);
    }

    #[test]
    fn test_corrupt_value() {
        let session = Session::in_memory();
        session
            .storage()
            .set_item(LAST_RECEIPT_KEY, "not json".to_string())
            .unwrap();

        assert!(matches!(
            session.receipts().load(),
            Err(SessionError::Corrupt { .. })
        ));

        session.receipts().clear().unwrap();
        assert!(session.receipts().load().unwrap().is_none());
    }
}

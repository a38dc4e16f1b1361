//! # Order Record
//!
//! The receipt synthesized when checkout succeeds.
//!
//! ## Stored Layout
//! ```text
//! {
//!   "id": "INV-482913",
//!   "date": "2026-10-17T14:02:11.250Z",
//!   "items": [ { "product": { "id", "name", "price", "image" }, "quantity" } ],
//!   "subtotal": 37.98, "tax": 3.04, "total": 41.02,
//!   "shippingAddress": { "name", "address", "city", "state", "zipCode", "country" },
//!   "paymentMethod": "credit-card"
//! }
//! ```
//!
//! The record snapshots the cart: later catalog or cart changes never alter a
//! receipt that was already issued.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::checkout::ValidCheckout;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, Product};
use crate::ORDER_ID_PREFIX;

// =============================================================================
// Order Id
// =============================================================================

/// Customer-facing order number: `INV-` followed by six digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Draws a fresh order number in `INV-100000..=INV-999999`.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::order::OrderId;
    ///
    /// let id = OrderId::generate(&mut rand::thread_rng());
    /// assert!(id.as_str().starts_with("INV-"));
    /// assert_eq!(id.as_str().len(), 10);
    /// ```
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let number: u32 = rng.gen_range(100_000..=999_999);
        OrderId(format!("{}{}", ORDER_ID_PREFIX, number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Receipt Parts
// =============================================================================

/// The product fields a receipt keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    pub id: u32,
    pub name: String,
    #[ts(type = "number")]
    pub price: Money,
    #[serde(default)]
    pub image: String,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        ProductSnapshot {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// One receipt line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub product: ProductSnapshot,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// Where the order ships. `name` is "first last".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingAddress {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

// =============================================================================
// Order Record
// =============================================================================

/// A completed order, as stored under the session's `lastReceipt` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderRecord {
    #[ts(type = "string")]
    pub id: OrderId,
    /// ISO-8601 timestamp of checkout.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub tax: Money,
    #[ts(type = "number")]
    pub total: Money,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

impl OrderRecord {
    /// Snapshots `cart` into a receipt.
    ///
    /// ## Errors
    /// `EmptyCart` when there is nothing to order.
    pub fn from_cart(id: OrderId, date: DateTime<Utc>, cart: &Cart, checkout: &ValidCheckout) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let totals = cart.totals();
        let items = cart
            .entries()
            .iter()
            .map(|entry| OrderItem {
                product: ProductSnapshot::from(&entry.product),
                quantity: entry.quantity,
            })
            .collect();

        Ok(OrderRecord {
            id,
            date,
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            shipping_address: checkout.shipping_address.clone(),
            payment_method: checkout.payment_method,
        })
    }

    /// Σ quantity over the receipt lines.
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn checkout() -> ValidCheckout {
        ValidCheckout {
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
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        let mut beans = Product::new(1, "Ethiopian Yirgacheffe", Money::from_cents(1899), "coffee");
        beans.image = "https://example.com/yirg.jpg".to_string();
        beans.description = "Bright and floral".to_string();
        cart.add(&beans, 2);
        cart
    }

    #[test]
    fn test_order_id_format() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let id = OrderId::generate(&mut rng);
            let digits = id.as_str().strip_prefix("INV-").unwrap();
            let number: u32 = digits.parse().unwrap();
            assert_eq!(digits.len(), 6);
            assert!((100_000..=999_999).contains(&number));
        }
    }

    #[test]
    fn test_order_id_is_deterministic_for_seed() {
        let a = OrderId::generate(&mut StdRng::seed_from_u64(42));
        let b = OrderId::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_cart_snapshots_totals() {
        let date = Utc.with_ymd_and_hms(2026, 10, 17, 14, 2, 11).unwrap();
        let id = OrderId::generate(&mut StdRng::seed_from_u64(1));
        let record = OrderRecord::from_cart(id, date, &cart(), &checkout()).unwrap();

        assert_eq!(record.items.len(), 1);
        assert_eq!(record.total_items(), 2);
        assert_eq!(record.subtotal.cents(), 3798);
        assert_eq!(record.tax.cents(), 304);
        assert_eq!(record.total.cents(), 4102);
        assert_eq!(record.items[0].line_total().cents(), 3798);
    }

    #[test]
    fn test_from_empty_cart_fails() {
        let id = OrderId::generate(&mut StdRng::seed_from_u64(1));
        let result = OrderRecord::from_cart(id, Utc::now(), &Cart::new(), &checkout());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_receipt_json_layout() {
        let date = Utc.with_ymd_and_hms(2026, 10, 17, 14, 2, 11).unwrap();
        let record = OrderRecord::from_cart(OrderId("INV-482913".to_string()), date, &cart(), &checkout()).unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "INV-482913");
        assert_eq!(json["date"], "2026-10-17T14:02:11Z");
        assert_eq!(json["subtotal"], 37.98);
        assert_eq!(json["tax"], 3.04);
        assert_eq!(json["total"], 41.02);
        assert_eq!(json["paymentMethod"], "credit-card");
        assert_eq!(json["shippingAddress"]["zipCode"], "97201");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["product"]["price"], 18.99);
        assert!(json["items"][0]["product"].get("description").is_none());

        let parsed: OrderRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_reads_receipt_with_full_product() {
        // Receipts written with the whole product object are still readable.
        let json = r#"{
            "id": "INV-100001",
            "date": "2026-10-17T14:02:11.250Z",
            "items": [{"product": {"id": 3, "name": "Pour-Over Kit", "price": 34.5,
                        "image": "", "category": "equipment", "description": "Glass"}, "quantity": 1}],
            "subtotal": 34.5, "tax": 2.76, "total": 37.26,
            "shippingAddress": {"name": "A B", "address": "1 St", "city": "C", "state": "S",
                                "zipCode": "12345", "country": "US"},
            "paymentMethod": "paypal"
        }"#;

        let record: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "INV-100001");
        assert_eq!(record.items[0].product.price.cents(), 3450);
        assert_eq!(record.payment_method, PaymentMethod::Paypal);
    }
}

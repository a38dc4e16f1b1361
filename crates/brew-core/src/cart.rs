//! # Cart
//!
//! The shopping cart of one session: an ordered list of (product, quantity)
//! entries plus the derived totals.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  add(product, n)          n <= 0      ──► no-op                         │
//! │                           in cart     ──► entry.quantity += n           │
//! │                           not in cart ──► push new entry                │
//! │                                                                         │
//! │  update_quantity(id, n)   n <= 0      ──► remove entry                  │
//! │                           otherwise   ──► entry.quantity = n            │
//! │                           unknown id  ──► no-op                         │
//! │                                                                         │
//! │  remove(id)               unconditional, no-op if absent                │
//! │  clear()                  empties the cart                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Entries are unique by product id (adding again merges quantities)
//! - Every entry has quantity >= 1
//! - Entries keep insertion order
//!
//! Operations take `i64` quantities because that is what arrives from the
//! page layer; the clamping above is applied before anything is stored.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{self, CartTotals};
use crate::types::{Product, TaxRate};

// =============================================================================
// Cart Entry
// =============================================================================

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    /// The product as it was when added.
    pub product: Product,

    /// Always at least 1 while the entry is in a cart.
    pub quantity: u32,
}

impl CartEntry {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of `product`, merging into an existing entry.
    ///
    /// A non-positive quantity changes nothing.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::{Cart, Money, Product};
    ///
    /// let beans = Product::new(1, "House Blend", Money::from_cents(1599), "coffee");
    /// let mut cart = Cart::new();
    /// cart.add(&beans, 2);
    /// cart.add(&beans, 3);
    ///
    /// assert_eq!(cart.entries().len(), 1);
    /// assert_eq!(cart.entries()[0].quantity, 5);
    /// ```
    pub fn add(&mut self, product: &Product, quantity: i64) {
        let Some(quantity) = positive_quantity(quantity) else {
            debug!(product_id = product.id, quantity, "ignoring non-positive add");
            return;
        };

        if let Some(entry) = self.entry_mut(product.id) {
            entry.quantity = entry.quantity.saturating_add(quantity);
            return;
        }

        self.entries.push(CartEntry {
            product: product.clone(),
            quantity,
        });
    }

    /// Sets the quantity of an entry to `max(0, quantity)`; zero removes it.
    ///
    /// Unknown product ids are ignored.
    pub fn update_quantity(&mut self, product_id: u32, quantity: i64) {
        match positive_quantity(quantity) {
            None => self.remove(product_id),
            Some(quantity) => {
                if let Some(entry) = self.entry_mut(product_id) {
                    entry.quantity = quantity;
                }
            }
        }
    }

    /// Removes the entry for `product_id`, if any.
    pub fn remove(&mut self, product_id: u32) {
        self.entries.retain(|entry| entry.product.id != product_id);
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// The entry for `product_id`, if present.
    pub fn get(&self, product_id: u32) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn subtotal(&self) -> Money {
        pricing::subtotal(&self.entries)
    }

    /// 8% of the subtotal.
    pub fn tax(&self) -> Money {
        self.subtotal().calculate_tax(TaxRate::sales_tax())
    }

    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }

    pub fn total_items(&self) -> u32 {
        pricing::total_items(&self.entries)
    }

    /// Every derived total at once.
    pub fn totals(&self) -> CartTotals {
        pricing::calculate_totals(&self.entries, TaxRate::sales_tax())
    }

    fn entry_mut(&mut self, product_id: u32) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|entry| entry.product.id == product_id)
    }
}

/// `Some(n)` for 1..=u32::MAX (larger values saturate), `None` otherwise.
fn positive_quantity(quantity: i64) -> Option<u32> {
    if quantity <= 0 {
        return None;
    }
    Some(u32::try_from(quantity).unwrap_or(u32::MAX))
}

// =============================================================================
// Unit Tests
// =============================================================================

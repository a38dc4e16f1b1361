//! # Pricing
//!
//! Pure reductions from cart entries to the numbers the page layer shows.
//!
//! ```text
//! entries ──► subtotal = Σ price × quantity
//!                 │
//!                 ├──► tax   = subtotal × 8%   (half a cent rounds up)
//!                 │
//!                 └──► total = subtotal + tax
//!
//! entries ──► total_items = Σ quantity        (header badge)
//! ```
//!
//! Tax is computed once on the subtotal, not per line, so the receipt's tax
//! line always equals 8% of its subtotal line.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartEntry;
use crate::money::Money;
use crate::types::TaxRate;

/// Derived totals of a cart. Recomputed on every read, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub tax: Money,
    #[ts(type = "number")]
    pub total: Money,
    /// Sum of quantities, not the number of distinct entries.
    pub total_items: u32,
}

/// Σ price × quantity.
pub fn subtotal(entries: &[CartEntry]) -> Money {
    entries.iter().map(CartEntry::line_total).sum()
}

/// Σ quantity.
pub fn total_items(entries: &[CartEntry]) -> u32 {
    entries
        .iter()
        .fold(0u32, |acc, entry| acc.saturating_add(entry.quantity))
}

/// Computes every derived total in one pass over the entries.
///
/// ## Example
/// ```rust
/// use brew_core::pricing::calculate_totals;
/// use brew_core::types::TaxRate;
///
/// let totals = calculate_totals(&[], TaxRate::sales_tax());
/// assert!(totals.total.is_zero());
/// assert_eq!(totals.total_items, 0);
/// ```
pub fn calculate_totals(entries: &[CartEntry], rate: TaxRate) -> CartTotals {
    let subtotal = subtotal(entries);
    let tax = subtotal.calculate_tax(rate);

    CartTotals {
        subtotal,
        tax,
        total: subtotal + tax,
        total_items: total_items(entries),
    }
}

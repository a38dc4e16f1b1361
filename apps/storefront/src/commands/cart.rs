//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Receipt  │       │
//! │  │  Cart    │     │          │     │   Form   │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart        checkout                           │
//! │                   update_cart_item   (checkout.rs)                      │
//! │                   remove_from_cart   clears the cart                    │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command answers with the full cart so the page can re-render from
//! one response.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartSnapshot, CartState, CatalogState};

/// Header badge count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBadge {
    pub total_items: u32,
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with entries and calculated totals
pub fn get_cart(cart: &CartState) -> CartSnapshot {
    debug!("get_cart command");
    cart.snapshot()
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: appended as a new entry
/// - Zero or negative quantity: nothing changes
///
/// ## Arguments
/// * `product_id` - Catalog id to add
/// * `quantity` - Quantity to add (default: 1)
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: u32,
    quantity: Option<i64>,
) -> Result<CartSnapshot, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id, quantity, "add_to_cart command");

    let product = catalog.with_catalog(|c| c.require(product_id).cloned())?;

    Ok(cart.with_cart_mut(|c| {
        c.add(&product, quantity);
        CartSnapshot::from(&*c)
    }))
}

/// Sets the quantity of an entry.
///
/// ## Behavior
/// - Quantity 0 or below: removes the entry
/// - Product not in cart: nothing changes
pub fn update_cart_item(cart: &CartState, product_id: u32, quantity: i64) -> CartSnapshot {
    debug!(product_id, quantity, "update_cart_item command");
    cart.with_cart_mut(|c| {
        c.update_quantity(product_id, quantity);
        CartSnapshot::from(&*c)
    })
}

/// Removes an entry. Unknown ids are ignored.
pub fn remove_from_cart(cart: &CartState, product_id: u32) -> CartSnapshot {
    debug!(product_id, "remove_from_cart command");
    cart.with_cart_mut(|c| {
        c.remove(product_id);
        CartSnapshot::from(&*c)
    })
}

pub fn clear_cart(cart: &CartState) -> CartSnapshot {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartSnapshot::from(&*c)
    })
}

pub fn cart_badge(cart: &CartState) -> CartBadge {
    CartBadge {
        total_items: cart.badge(),
    }
}

//! # Cart State
//!
//! Holds the session's cart and publishes every change.
//!
//! ## Thread Safety
//! The cart sits behind a `Mutex` because command handlers run on a
//! multi-threaded runtime and only one of them may change the cart at a time.
//!
//! ## Change Publication
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command                 CartState                   Subscribers        │
//! │  ───────                 ─────────                   ───────────        │
//! │                                                                         │
//! │  add_to_cart ──────────► with_cart_mut(add) ──┐                         │
//! │  update_cart_item ─────► with_cart_mut(...) ──┤                         │
//! │  remove_from_cart ─────► with_cart_mut(...) ──┼─► watch::Sender ► badge │
//! │  clear_cart / checkout ► with_cart_mut(...) ──┘   (snapshot)     ► page │
//! │                                                                         │
//! │  get_cart / cart_badge ► with_cart(...)        (read only, no publish)  │
//! │                                                                         │
//! │  The snapshot is replaced while the cart lock is still held, so         │
//! │  subscribers never see an older cart after a newer one.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, PoisonError};

use brew_core::{Cart, CartEntry, CartTotals};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Entries plus derived totals: what the cart page renders and what
/// subscribers receive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub entries: Vec<CartEntry>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            entries: cart.entries().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Shared cart state.
#[derive(Debug)]
pub struct CartState {
    cart: Mutex<Cart>,
    updates: watch::Sender<CartSnapshot>,
}

impl CartState {
    /// Creates an empty cart state.
    pub fn new() -> Self {
        let (updates, _) = watch::channel(CartSnapshot::default());
        CartState {
            cart: Mutex::new(Cart::new()),
            updates,
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart, then publishes the
    /// new snapshot if the cart changed.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add(&product, 1));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut cart);

        let snapshot = CartSnapshot::from(&*cart);
        self.updates.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });

        result
    }

    /// Current entries and totals.
    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(|cart| CartSnapshot::from(cart))
    }

    /// Item count for the header badge.
    pub fn badge(&self) -> u32 {
        self.with_cart(Cart::total_items)
    }

    /// Receives a snapshot after every change to the cart.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.updates.subscribe()
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

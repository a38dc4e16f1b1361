//! # Checkout Command
//!
//! Turns the cart into an order.
//!
//! ## Order Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(form)                                                         │
//! │       │                                                                 │
//! │       ├── cart empty? ──────────────────────► {redirect, view: "cart"}  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutFlow::submit(form)                                             │
//! │       │                                                                 │
//! │       ├── invalid ──► resume_editing ───────► VALIDATION_ERROR + fields │
//! │       │               (cart and receipt untouched)                      │
//! │       ▼                                                                 │
//! │  OrderRecord::from_cart  (id INV-######, now)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  receipts().save  ──► session["lastReceipt"]  (overwrites)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  confirmation email (bounded by notification timeout)                   │
//! │       │  failure or timeout: warn!, emailSent = false                   │
//! │       ▼                                                                 │
//! │  clear cart ──► CheckoutFlow::complete ─────► {placed, view: "receipt"} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No payment is taken; every valid checkout succeeds.

use brew_core::{Cart, CheckoutFlow, CheckoutForm, OrderId, OrderRecord, View};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{CartState, NotifierState, SessionState};

/// Result of a checkout submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum CheckoutResponse {
    /// Nothing to check out; the page should show `view` instead.
    Redirect { view: View },

    /// The order was placed.
    Placed(PlacedOrder),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: OrderRecord,
    /// Whether the confirmation email was accepted by the sender.
    pub email_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_error: Option<String>,
    pub view: View,
}

/// Validates the form and places the order.
///
/// ## Errors
/// - `VALIDATION_ERROR` with per-field messages when the form is invalid
/// - `SESSION_ERROR` when the receipt cannot be stored (the cart is kept)
///
/// A failed confirmation email is not an error; it is reported in the
/// response and the order still completes.
pub async fn checkout(
    cart: &CartState,
    session: &SessionState,
    notifier: &NotifierState,
    form: CheckoutForm,
) -> Result<CheckoutResponse, ApiError> {
    debug!(email = %form.email, payment_method = %form.payment_method, "checkout command");

    let ordered: Cart = cart.with_cart(Cart::clone);
    if ordered.is_empty() {
        debug!("Checkout with an empty cart, redirecting to cart");
        return Ok(CheckoutResponse::Redirect { view: View::Cart });
    }

    let mut flow = CheckoutFlow::new();
    let valid = match flow.submit(&form) {
        Ok(valid) => valid,
        Err(err) => {
            flow.resume_editing()?;
            debug!("Checkout form rejected");
            return Err(err.into());
        }
    };

    let order_id = OrderId::generate(&mut rand::thread_rng());
    let order = OrderRecord::from_cart(order_id, Utc::now(), &ordered, &valid)?;
    session.inner().receipts().save(&order)?;

    let message = notifier.store().order_confirmation(&valid.email, &order);
    let notification_error = match notifier.deliver(&message).await {
        Ok(receipt) => {
            debug!(order_id = %order.id, message_id = %receipt.id, "Order confirmation sent");
            None
        }
        Err(e) => {
            warn!(order_id = %order.id, error = %e, "Order confirmation email failed");
            Some(e.to_string())
        }
    };

    cart.with_cart_mut(Cart::clear);
    flow.complete(order.id.as_str())?;

    info!(
        order_id = %order.id,
        items = order.total_items(),
        total = %order.total,
        payment_method = %order.payment_method,
        "Order placed"
    );

    Ok(CheckoutResponse::Placed(PlacedOrder {
        email_sent: notification_error.is_none(),
        notification_error,
        order,
        view: View::Receipt,
    }))
}

//! # brew-core: Pure Business Logic for the Bean & Brew Storefront
//!
//! This crate is the heart of the storefront. It holds the cart, the pricing
//! rules, checkout validation and the receipt layout as pure code with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bean & Brew Storefront                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Page Layer (web)                             │   │
//! │  │   Products ──► Cart ──► Checkout ──► Receipt                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (commands)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brew-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ checkout │ │ order  │  │   │
//! │  │   │ Product │ │  Money  │ │  Cart   │ │  forms   │ │ Record │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Review, PaymentMethod, View)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Cart totals: subtotal, tax, total, item count
//! - [`cart`] - The cart and its entries
//! - [`checkout`] - Checkout form validation and the checkout state machine
//! - [`order`] - Order record (receipt) synthesis
//! - [`catalog`] - Product browsing, reviews
//! - [`forms`] - Contact form and newsletter signup
//! - [`validation`] - Field validators shared by every form
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use brew_core::cart::Cart;
//! use brew_core::money::Money;
//! use brew_core::types::Product;
//!
//! let beans = Product::new(1, "House Blend", Money::from_cents(1000), "coffee");
//!
//! let mut cart = Cart::new();
//! cart.add(&beans, 1);
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal.cents(), 1000);
//! assert_eq!(totals.tax.cents(), 80);
//! assert_eq!(totals.total.cents(), 1080);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod forms;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, CatalogQuery, NewReview, SortOrder};
pub use checkout::{CheckoutFlow, CheckoutForm, CheckoutPhase, ValidCheckout};
pub use error::{CoreError, CoreResult, FormErrors, ValidationError};
pub use forms::{ContactForm, NewsletterSignup};
pub use money::Money;
pub use order::{OrderId, OrderItem, OrderRecord, ProductSnapshot, ShippingAddress};
pub use pricing::CartTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied to every cart, in basis points (800 = 8%).
///
/// The storefront sells into a single market, so the rate is fixed rather
/// than configured per product.
pub const SALES_TAX_BPS: u32 = 800;

/// Prefix of every generated order number (`INV-123456`).
pub const ORDER_ID_PREFIX: &str = "INV-";

/// Minimum length of a ZIP / postal code on the checkout form.
pub const MIN_ZIP_LENGTH: usize = 5;

/// Number of "similar products" shown on a product page.
pub const SIMILAR_PRODUCTS_LIMIT: usize = 4;

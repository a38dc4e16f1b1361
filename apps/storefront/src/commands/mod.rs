//! # Commands Module
//!
//! Every command the page layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Product list, product page, reviews
//! ├── cart.rs      ◄─── Cart manipulation and badge
//! ├── checkout.rs  ◄─── Order placement
//! ├── receipt.rs   ◄─── Last receipt of the session
//! ├── contact.rs   ◄─── Contact form and newsletter
//! └── config.rs    ◄─── Public configuration
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartSnapshot
//!
//! // Needs catalog and cart
//! fn add_to_cart(catalog: &CatalogState, cart: &CartState, ...)
//!
//! // Cart, session storage and the email sender
//! async fn checkout(cart: &CartState, session: &SessionState, notifier: &NotifierState, ...)
//! ```
//!
//! `ipc::dispatch` picks the states out of the `Storefront` and calls the
//! command.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod receipt;

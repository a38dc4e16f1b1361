//! # State Module
//!
//! Application state for the storefront, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ CatalogState │ │  CartState   │ │ SessionState │ │NotifierState │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │  RwLock<     │ │  Mutex<Cart> │ │  Session     │ │  dyn Email-  │   │
//! │  │   Catalog>   │ │  + watch tx  │ │  (receipt)   │ │   Notifier   │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  ConfigState: read-only after startup                                   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: many readers, one review writer                       │
//! │  • CartState: exclusive lock per mutation, snapshot published inside   │
//! │  • SessionState: storage backend locks internally                      │
//! │  • NotifierState: senders are Send + Sync                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod notifier;
mod session;

pub use cart::{CartSnapshot, CartState};
pub use catalog::{CatalogState, BUNDLED_CATALOG};
pub use config::{
    CatalogSettings, CheckoutSettings, ConfigError, ConfigState, EmailProvider, EmailSettings,
    StoreSettings, StorefrontConfig, CONFIG_PATH_ENV,
};
pub use notifier::NotifierState;
pub use session::SessionState;

//! # brew-session: Session Storage for the Bean & Brew Storefront
//!
//! This crate provides the session-scoped key/value storage the storefront
//! keeps between page views, and typed repositories over it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Data Flow                               │
//! │                                                                         │
//! │  Command (checkout / view_receipt)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  brew-session (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐                  │   │
//! │  │   │    Session    │    │    Repositories    │                  │   │
//! │  │   │ (session.rs)  │    │    (receipt.rs)    │                  │   │
//! │  │   │               │◄───│                    │                  │   │
//! │  │   │ id + storage  │    │ ReceiptRepository  │                  │   │
//! │  │   └───────┬───────┘    └────────────────────┘                  │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SessionStorage (storage.rs)                                   │   │
//! │  │   "lastReceipt" ──► "{\"id\":\"INV-482913\", ...}"              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - The key/value storage trait and the in-memory backend
//! - [`session`] - The session handle that hands out repositories
//! - [`repository`] - Typed repositories (receipt)
//! - [`error`] - Session error types
//!
//! ## Usage
//!
//! ```rust
//! use brew_session::Session;
//!
//! let session = Session::in_memory();
//! assert!(session.receipts().load()?.is_none());
//! # Ok::<(), brew_session::SessionError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod session;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SessionError, SessionResult};
pub use repository::receipt::{ReceiptRepository, LAST_RECEIPT_KEY};
pub use session::Session;
pub use storage::{MemoryStorage, SessionStorage};

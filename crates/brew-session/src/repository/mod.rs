//! # Repository Module
//!
//! Typed access to values kept in session storage.
//!
//! ```text
//! Command
//!    │  session.receipts().save(&record)
//!    ▼
//! ReceiptRepository ── JSON encode ──► SessionStorage["lastReceipt"]
//! ```
//!
//! ## Available Repositories
//!
//! - [`ReceiptRepository`](receipt::ReceiptRepository) - The last order record

pub mod receipt;

//! # Session Handle
//!
//! One shopper's session: an id plus the storage behind it.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::SessionResult;
use crate::repository::receipt::ReceiptRepository;
use crate::storage::{MemoryStorage, SessionStorage};

/// Session handle providing repository access.
///
/// ## Design: Multiple State Types
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Storefront State                                                       │
/// │                                                                         │
/// │  SessionState   ← stored receipt          (this crate)                  │
/// │  CartState      ← live cart + subscribers (storefront app)              │
/// │  CatalogState   ← products and reviews    (storefront app)              │
/// │                                                                         │
/// │  Commands take only the states they touch.                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Cloning is cheap; clones share the same storage.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    /// Opens a session over `storage`.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let id = Uuid::new_v4();
        info!(session_id = %id, "Session started");
        Session { id, storage }
    }

    /// Opens a session backed by [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Raw access for values without a repository.
    pub fn storage(&self) -> &dyn SessionStorage {
        self.storage.as_ref()
    }

    /// Returns the receipt repository.
    pub fn receipts(&self) -> ReceiptRepository {
        ReceiptRepository::new(self.storage.clone())
    }

    /// Drops everything stored for this session.
    pub fn end(&self) -> SessionResult<()> {
        info!(session_id = %self.id, "Session ended");
        self.storage.clear()
    }
}

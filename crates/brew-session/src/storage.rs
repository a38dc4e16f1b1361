//! # Session Storage
//!
//! String key/value storage scoped to one session, with the same surface as
//! a browser's session storage: get, set, remove, clear.
//!
//! Values are opaque strings here; repositories own the encoding.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::SessionResult;

/// A session-scoped key/value store.
pub trait SessionStorage: Send + Sync + std::fmt::Debug {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>>;

    /// Stores `value`, replacing any previous value.
    fn set_item(&self, key: &str, value: String) -> SessionResult<()>;

    fn remove_item(&self, key: &str) -> SessionResult<()>;

    fn clear(&self) -> SessionResult<()>;
}

/// In-process storage. Everything is dropped with the session.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: String) -> SessionResult<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "one".to_string()).unwrap();
        storage.set_item("k", "two".to_string()).unwrap();

        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("two"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let storage = MemoryStorage::new();
        storage.set_item("a", "1".to_string()).unwrap();
        storage.set_item("b", "2".to_string()).unwrap();

        storage.remove_item("a").unwrap();
        storage.remove_item("missing").unwrap();
        assert!(storage.get_item("a").unwrap().is_none());

        storage.clear().unwrap();
        assert!(storage.is_empty());
    }
}

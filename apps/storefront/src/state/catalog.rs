//! # Catalog State
//!
//! Products and reviews for the session.
//!
//! Products never change after loading. Reviews grow when a shopper submits
//! one, so the catalog sits behind an `RwLock`: product pages read
//! concurrently and `submit_review` takes the write lock briefly.

use std::path::Path;
use std::sync::{PoisonError, RwLock};

use brew_core::{Catalog, CoreError, CoreResult};
use tracing::info;

/// Catalog bundled with the binary, used when no catalog path is configured.
pub const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug)]
pub struct CatalogState {
    catalog: RwLock<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: RwLock::new(catalog),
        }
    }

    /// The bundled catalog.
    pub fn bundled() -> CoreResult<Self> {
        Catalog::from_json(BUNDLED_CATALOG).map(Self::new)
    }

    /// Loads a catalog file, or the bundled catalog when `path` is `None`.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let Some(path) = path else {
            info!("Using bundled catalog");
            return Self::bundled();
        };

        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::InvalidCatalog(format!("cannot read {}: {}", path.display(), e))
        })?;
        let catalog = Catalog::from_json(&json)?;
        info!(?path, products = catalog.products().len(), "Catalog loaded");

        Ok(Self::new(catalog))
    }

    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }
}

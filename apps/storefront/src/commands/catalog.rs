//! # Catalog Commands
//!
//! Product listing, product pages and reviews.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Home page      ──► featured_products                                   │
//! │  Products page  ──► list_categories, list_products {category, search,  │
//! │                                                      sort}              │
//! │  Product page   ──► get_product (product + reviews + similar)           │
//! │  Review form    ──► submit_review                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brew_core::{CatalogQuery, NewReview, Product, Review};
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;

/// Reviews of one product plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub reviews: Vec<Review>,
    /// Rounded to one decimal; absent without reviews.
    pub average_rating: Option<f64>,
    pub count: usize,
}

/// Everything the product page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub product: Product,
    pub reviews: ReviewSummary,
    pub similar: Vec<Product>,
}

/// Filtered, sorted product list.
pub fn list_products(catalog: &CatalogState, query: CatalogQuery) -> Vec<Product> {
    debug!(category = ?query.category, search = ?query.search, sort = ?query.sort, "list_products command");
    catalog.with_catalog(|c| c.browse(&query))
}

/// `"all"` followed by each category.
pub fn list_categories(catalog: &CatalogState) -> Vec<String> {
    debug!("list_categories command");
    catalog.with_catalog(|c| c.categories())
}

pub fn featured_products(catalog: &CatalogState) -> Vec<Product> {
    debug!("featured_products command");
    catalog.with_catalog(|c| c.featured().into_iter().cloned().collect())
}

pub fn similar_products(catalog: &CatalogState, product_id: u32) -> Result<Vec<Product>, ApiError> {
    debug!(product_id, "similar_products command");
    catalog.with_catalog(|c| Ok(c.similar(product_id)?.into_iter().cloned().collect()))
}

pub fn product_reviews(catalog: &CatalogState, product_id: u32) -> Result<ReviewSummary, ApiError> {
    debug!(product_id, "product_reviews command");
    catalog.with_catalog(|c| {
        c.require(product_id)?;
        let reviews: Vec<Review> = c.reviews_for(product_id).into_iter().cloned().collect();
        Ok(ReviewSummary {
            count: reviews.len(),
            average_rating: c.average_rating(product_id),
            reviews,
        })
    })
}

/// Product, its reviews and up to four similar products.
pub fn get_product(catalog: &CatalogState, product_id: u32) -> Result<ProductPage, ApiError> {
    debug!(product_id, "get_product command");
    let product = catalog.with_catalog(|c| c.require(product_id).cloned())?;
    let reviews = product_reviews(catalog, product_id)?;
    let similar = similar_products(catalog, product_id)?;

    Ok(ProductPage {
        product,
        reviews,
        similar,
    })
}

/// Adds a review dated today.
pub fn submit_review(catalog: &CatalogState, review: NewReview) -> Result<Review, ApiError> {
    debug!(product_id = review.product_id, rating = review.rating, "submit_review command");
    let today = Utc::now().date_naive();
    Ok(catalog.with_catalog_mut(|c| c.submit_review(review, today))?)
}

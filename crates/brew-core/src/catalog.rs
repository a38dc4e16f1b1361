//! # Catalog
//!
//! Product browsing and customer reviews over the static catalog data.
//!
//! ## Browse Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  all products                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  category filter   ("all" keeps everything)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search filter     (case-insensitive, name or description)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sort              name | price-asc | price-desc                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products never change after loading. Reviews grow as customers submit them
//! but are never edited or removed.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, FormErrors};
use crate::types::{Product, Review};
use crate::validation::{validate_rating, validate_required};
use crate::SIMILAR_PRODUCTS_LIMIT;

/// Category value that disables the category filter.
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Query Types
// =============================================================================

/// Product list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortOrder {
    /// Alphabetical by name.
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
}

/// Filters for [`Catalog::browse`]. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CatalogQuery {
    /// Category slug, or `"all"` / absent for every category.
    #[ts(optional)]
    pub category: Option<String>,
    /// Free-text search term.
    #[ts(optional)]
    pub search: Option<String>,
    pub sort: SortOrder,
}

/// A review as the review form submits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct NewReview {
    pub product_id: u32,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// The catalog file: `{ "products": [...], "reviews": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
    #[serde(default)]
    reviews: Vec<Review>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and negative prices.
    pub fn new(products: Vec<Product>, reviews: Vec<Review>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CoreError::InvalidCatalog(format!("duplicate product id {}", product.id)));
            }
            if product.price.is_negative() {
                return Err(CoreError::InvalidCatalog(format!(
                    "product {} has a negative price",
                    product.id
                )));
            }
        }

        Ok(Catalog { products, reviews })
    }

    /// Parses the catalog file contents.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: Catalog =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidCatalog(e.to_string()))?;
        Self::new(raw.products, raw.reviews)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Like [`get`](Self::get) but missing ids are an error.
    pub fn require(&self, id: u32) -> CoreResult<&Product> {
        self.get(id).ok_or(CoreError::ProductNotFound(id))
    }

    /// `"all"` followed by each distinct category in catalog order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(
                self.products
                    .iter()
                    .filter(|product| seen.insert(product.category.as_str()))
                    .map(|product| product.category.clone()),
            )
            .collect()
    }

    /// Filters and sorts the product list.
    pub fn browse(&self, query: &CatalogQuery) -> Vec<Product> {
        let category = query
            .category
            .as_deref()
            .filter(|category| *category != ALL_CATEGORIES);
        let term = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        let mut result: Vec<Product> = self
            .products
            .iter()
            .filter(|product| category.map_or(true, |c| product.category == c))
            .filter(|product| {
                term.as_deref().map_or(true, |term| {
                    product.name.to_lowercase().contains(term)
                        || product.description.to_lowercase().contains(term)
                })
            })
            .cloned()
            .collect();

        match query.sort {
            SortOrder::Name => result.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            }),
            SortOrder::PriceAsc => result.sort_by_key(|product| product.price),
            SortOrder::PriceDesc => result.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        result
    }

    /// Products flagged for the home page.
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|product| product.featured).collect()
    }

    /// Up to four other products from the same category.
    pub fn similar(&self, id: u32) -> CoreResult<Vec<&Product>> {
        let product = self.require(id)?;
        Ok(self
            .products
            .iter()
            .filter(|other| other.category == product.category && other.id != product.id)
            .take(SIMILAR_PRODUCTS_LIMIT)
            .collect())
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    pub fn reviews_for(&self, product_id: u32) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|review| review.product_id == product_id)
            .collect()
    }

    /// Mean star rating rounded to one decimal, `None` without reviews.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::default();
    /// assert_eq!(catalog.average_rating(1), None);
    /// ```
    pub fn average_rating(&self, product_id: u32) -> Option<f64> {
        let ratings: Vec<u8> = self
            .reviews_for(product_id)
            .iter()
            .map(|review| review.rating)
            .collect();
        if ratings.is_empty() {
            return None;
        }

        let sum: u32 = ratings.iter().map(|r| *r as u32).sum();
        let mean = sum as f64 / ratings.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }

    /// Validates and appends a review dated `today`.
    ///
    /// The new id is the total review count plus one.
    pub fn submit_review(&mut self, review: NewReview, today: NaiveDate) -> CoreResult<Review> {
        self.require(review.product_id)?;

        let mut errors = FormErrors::new();
        errors.check(validate_required("userName", "Name", &review.user_name));
        errors.check(validate_rating("rating", review.rating));
        errors.check(validate_required("comment", "Comment", &review.comment));
        errors.into_result()?;

        let review = Review {
            id: self.reviews.len() as u32 + 1,
            product_id: review.product_id,
            user_name: review.user_name.trim().to_string(),
            rating: review.rating,
            comment: review.comment.trim().to_string(),
            date: today,
        };
        info!(product_id = review.product_id, review_id = review.id, "review added");

        self.reviews.push(review.clone());
        Ok(review)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: u32, name: &str, cents: i64, category: &str) -> Product {
        let mut product = Product::new(id, name, Money::from_cents(cents), category);
        product.description = format!("{} from our roastery", name);
        product
    }

    fn review(id: u32, product_id: u32, rating: u8) -> Review {
        Review {
            id,
            product_id,
            user_name: "Coffee Lover".to_string(),
            rating,
            comment: "Great".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
        }
    }

    fn catalog() -> Catalog {
        let mut yirg = product(1, "Ethiopian Yirgacheffe", 1899, "coffee");
        yirg.featured = true;
        let mut matcha = product(4, "ceremonial Matcha", 2999, "tea");
        matcha.description = "Stone-ground green tea".to_string();

        Catalog::new(
            vec![
                yirg,
                product(2, "Colombian Supremo", 1699, "coffee"),
                product(3, "Pour-Over Kit", 3450, "equipment"),
                matcha,
                product(5, "Brazil Santos", 1499, "coffee"),
                product(6, "Sumatra Mandheling", 1799, "coffee"),
                product(7, "Guatemala Antigua", 1750, "coffee"),
                product(8, "Kenya AA", 2199, "coffee"),
            ],
            vec![review(1, 1, 5), review(2, 1, 4), review(3, 2, 5), review(4, 1, 4)],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(
            vec![product(1, "A", 100, "coffee"), product(1, "B", 100, "tea")],
            vec![],
        );
        assert!(matches!(result, Err(CoreError::InvalidCatalog(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"products":[{"id":1,"name":"House Blend","price":12.5,"category":"coffee"}]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.require(1).unwrap().price.cents(), 1250);
        assert!(catalog.reviews_for(1).is_empty());

        assert!(Catalog::from_json("{").is_err());
        assert!(matches!(catalog.require(2), Err(CoreError::ProductNotFound(2))));
    }

    #[test]
    fn test_categories_all_first_then_first_seen_order() {
        assert_eq!(catalog().categories(), vec!["all", "coffee", "equipment", "tea"]);
    }

    #[test]
    fn test_browse_category_and_sort() {
        let catalog = catalog();

        let query = CatalogQuery {
            category: Some("coffee".to_string()),
            sort: SortOrder::PriceAsc,
            ..Default::default()
        };
        let prices: Vec<i64> = catalog.browse(&query).iter().map(|p| p.price.cents()).collect();
        assert_eq!(prices, vec![1499, 1699, 1750, 1799, 1899, 2199]);

        let query = CatalogQuery {
            category: Some("all".to_string()),
            sort: SortOrder::PriceDesc,
            ..Default::default()
        };
        assert_eq!(catalog.browse(&query)[0].id, 3);
        assert_eq!(catalog.browse(&query).len(), 8);
    }

    #[test]
    fn test_browse_name_sort_ignores_case() {
        let names: Vec<String> = catalog()
            .browse(&CatalogQuery::default())
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names[0], "Brazil Santos");
        assert_eq!(names[1], "ceremonial Matcha");
    }

    #[test]
    fn test_browse_search_matches_name_or_description() {
        let catalog = catalog();

        let by_name = CatalogQuery {
            search: Some("KENYA".to_string()),
            ..Default::default()
        };
        assert_eq!(catalog.browse(&by_name).len(), 1);

        let by_description = CatalogQuery {
            search: Some("green tea".to_string()),
            ..Default::default()
        };
        assert_eq!(catalog.browse(&by_description)[0].id, 4);

        let blank = CatalogQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(catalog.browse(&blank).len(), 8);
    }

    #[test]
    fn test_sort_order_wire_names() {
        let query: CatalogQuery = serde_json::from_str(r#"{"sort":"price-desc"}"#).unwrap();
        assert_eq!(query.sort, SortOrder::PriceDesc);
        assert!(query.category.is_none());
    }

    #[test]
    fn test_featured_and_similar() {
        let catalog = catalog();
        assert_eq!(catalog.featured().len(), 1);

        let similar = catalog.similar(1).unwrap();
        assert_eq!(similar.len(), 4);
        assert!(similar.iter().all(|p| p.category == "coffee" && p.id != 1));

        assert!(catalog.similar(3).unwrap().is_empty());
        assert!(catalog.similar(99).is_err());
    }

    #[test]
    fn test_average_rating() {
        let catalog = catalog();
        // (5 + 4 + 4) / 3 = 4.333...
        assert_eq!(catalog.average_rating(1), Some(4.3));
        assert_eq!(catalog.average_rating(2), Some(5.0));
        assert_eq!(catalog.average_rating(3), None);
    }

    #[test]
    fn test_submit_review() {
        let mut catalog = catalog();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

        let review = catalog
            .submit_review(
                NewReview {
                    product_id: 3,
                    user_name: "  Barista Bo ".to_string(),
                    rating: 4,
                    comment: "Clean cups".to_string(),
                },
                today,
            )
            .unwrap();

        assert_eq!(review.id, 5);
        assert_eq!(review.user_name, "Barista Bo");
        assert_eq!(review.date, today);
        assert_eq!(catalog.average_rating(3), Some(4.0));
    }

    #[test]
    fn test_submit_review_validation() {
        let mut catalog = catalog();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

        let result = catalog.submit_review(
            NewReview {
                product_id: 1,
                user_name: " ".to_string(),
                rating: 0,
                comment: String::new(),
            },
            today,
        );

        match result {
            Err(CoreError::InvalidForm(errors)) => {
                assert_eq!(errors.len(), 3);
                assert_eq!(errors.get("userName").unwrap().to_string(), "Name is required");
                assert_eq!(errors.get("comment").unwrap().to_string(), "Comment is required");
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(catalog.reviews_for(1).len(), 3);
    }
}

//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Review      │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  id             │   │  credit-card    │       │
//! │  │  name, price    │   │  product_id     │   │  paypal         │       │
//! │  │  category       │   │  rating 1..=5   │   └─────────────────┘       │
//! │  │  details?       │   │  date           │                              │
//! │  └─────────────────┘   └─────────────────┘   ┌─────────────────┐       │
//! │                                              │      View       │       │
//! │  ┌─────────────────┐                         │  ─────────────  │       │
//! │  │    TaxRate      │                         │  home, cart,    │       │
//! │  │  bps (u32)      │                         │  receipt        │       │
//! │  │  800 = 8%       │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable reference data loaded from the catalog file. The
//! cart keeps its own clone of each product it holds.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (the storefront's sales tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// The storefront's sales tax.
    #[inline]
    pub const fn sales_tax() -> Self {
        TaxRate(crate::SALES_TAX_BPS)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::sales_tax()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: u32,

    /// Display name shown on cards, cart lines and receipts.
    pub name: String,

    /// Long-form description for the product page.
    #[serde(default)]
    pub description: String,

    /// Unit price. Serialized in dollars.
    #[ts(type = "number")]
    pub price: Money,

    /// Image reference (URL).
    #[serde(default)]
    pub image: String,

    /// Category slug: "coffee", "tea", "equipment", ...
    pub category: String,

    /// Shown in the home page's featured section.
    #[serde(default)]
    pub featured: bool,

    /// Optional attributes shown on the product page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub details: Option<ProductDetails>,
}

impl Product {
    /// Creates a bare product (no description, image or details).
    pub fn new(id: u32, name: impl Into<String>, price: Money, category: impl Into<String>) -> Self {
        Product {
            id,
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: category.into(),
            featured: false,
            details: None,
        }
    }
}

/// Free-form attributes of a product. Every field is optional; coffee uses
/// origin/roast fields, tea uses steep fields, equipment uses material/size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub origins: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub roast_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub flavor: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub process: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub altitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub harvest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub steep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub temperature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub filter_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub includes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub care: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub allergens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub nutrition: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub settings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub warranty: Option<String>,
}

/// Nutrition facts for food products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: String,
    pub fat: String,
    pub carbs: String,
}

// =============================================================================
// Review
// =============================================================================

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    pub id: u32,
    pub product_id: u32,
    pub user_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    #[ts(as = "String")]
    pub date: NaiveDate,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer chose to pay. Checkout never charges anything; the
/// method is recorded on the receipt as a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum PaymentMethod {
    /// Serialized as `credit-card`.
    CreditCard,
    /// Serialized as `paypal`.
    Paypal,
}

impl PaymentMethod {
    /// Every accepted method, in the order the checkout page lists them.
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::CreditCard, PaymentMethod::Paypal];

    /// The wire label (`credit-card`, `paypal`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit-card",
            PaymentMethod::Paypal => "paypal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or(())
    }
}

// =============================================================================
// View
// =============================================================================

/// A page the page layer should navigate to after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum View {
    Home,
    Cart,
    Receipt,
}

// =============================================================================
// Unit Tests
// =============================================================================

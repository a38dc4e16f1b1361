//! # Config Commands
//!
//! Commands for retrieving storefront configuration.

use brew_core::TaxRate;
use serde::Serialize;
use tracing::debug;

use crate::state::{ConfigState, EmailProvider};

/// What the page layer may know about the configuration. Never carries the
/// email API key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub store_name: String,
    pub support_email: String,
    pub site_url: String,
    pub postal_address: String,
    pub currency: &'static str,
    pub tax_rate_bps: u32,
    /// Percentage for display, e.g. `8.0`.
    pub tax_rate_percent: f64,
    pub email_provider: EmailProvider,
}

/// Gets the current storefront configuration.
///
/// ## When Used
/// - App startup (header, footer, contact page)
/// - Cart page tax label
pub fn get_config(config: &ConfigState) -> PublicConfig {
    debug!("get_config command");
    let config = config.get();
    let tax = TaxRate::sales_tax();

    PublicConfig {
        store_name: config.store.name.clone(),
        support_email: config.store.support_email.clone(),
        site_url: config.store.site_url.clone(),
        postal_address: config.store.postal_address.clone(),
        currency: "USD",
        tax_rate_bps: tax.bps(),
        tax_rate_percent: tax.percentage(),
        email_provider: config.email.provider,
    }
}

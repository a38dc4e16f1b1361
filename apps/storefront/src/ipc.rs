//! # Command Channel
//!
//! One JSON command per line in, one JSON response per line out.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin                                                                  │
//! │  {"cmd":"add_to_cart","productId":1,"quantity":2}                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  serde_json::from_str::<Invoke>  ── malformed ──► VALIDATION_ERROR      │
//! │        │                          (also non-UTF-8 bytes)                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  dispatch ──► commands::cart::add_to_cart(&catalog, &cart, 1, Some(2))  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  stdout                                                                 │
//! │  {"ok":{"entries":[...],"totals":{...}}}                                │
//! │  {"error":{"code":"NOT_FOUND","message":"Product not found: 9"}}        │
//! │                                                                         │
//! │  Cart changes are also pushed, unprompted:                              │
//! │  {"event":"cart_updated","cart":{"entries":[...],"totals":{...}}}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brew_core::{CatalogQuery, CheckoutForm, ContactForm, NewReview, NewsletterSignup, SortOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::commands;
use crate::error::ApiError;
use crate::state::CartSnapshot;
use crate::Storefront;

/// A command from the page layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Invoke {
    // Catalog
    ListProducts {
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        search: Option<String>,
        #[serde(default)]
        sort: SortOrder,
    },
    GetProduct {
        product_id: u32,
    },
    ListCategories,
    FeaturedProducts,
    SimilarProducts {
        product_id: u32,
    },
    ProductReviews {
        product_id: u32,
    },
    SubmitReview {
        review: NewReview,
    },

    // Cart
    GetCart,
    AddToCart {
        product_id: u32,
        #[serde(default)]
        quantity: Option<i64>,
    },
    UpdateCartItem {
        product_id: u32,
        quantity: i64,
    },
    RemoveFromCart {
        product_id: u32,
    },
    ClearCart,
    CartBadge,

    // Checkout & receipt
    Checkout {
        form: CheckoutForm,
    },
    ViewReceipt,

    // Forms
    SubmitContact {
        form: ContactForm,
    },
    SubscribeNewsletter {
        email: String,
    },

    GetConfig,
}

/// One response line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Response {
    Ok(Value),
    Error(ApiError),
}

/// A message pushed without a command.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    CartUpdated { cart: CartSnapshot },
}

/// Runs one command against the storefront.
pub async fn dispatch(app: &Storefront, invoke: Invoke) -> Result<Value, ApiError> {
    use commands::{cart, catalog, checkout, config, contact, receipt};

    let value = match invoke {
        Invoke::ListProducts {
            category,
            search,
            sort,
        } => serde_json::to_value(catalog::list_products(
            &app.catalog,
            CatalogQuery {
                category,
                search,
                sort,
            },
        ))?,
        Invoke::GetProduct { product_id } => {
            serde_json::to_value(catalog::get_product(&app.catalog, product_id)?)?
        }
        Invoke::ListCategories => serde_json::to_value(catalog::list_categories(&app.catalog))?,
        Invoke::FeaturedProducts => serde_json::to_value(catalog::featured_products(&app.catalog))?,
        Invoke::SimilarProducts { product_id } => {
            serde_json::to_value(catalog::similar_products(&app.catalog, product_id)?)?
        }
        Invoke::ProductReviews { product_id } => {
            serde_json::to_value(catalog::product_reviews(&app.catalog, product_id)?)?
        }
        Invoke::SubmitReview { review } => {
            serde_json::to_value(catalog::submit_review(&app.catalog, review)?)?
        }

        Invoke::GetCart => serde_json::to_value(cart::get_cart(&app.cart))?,
        Invoke::AddToCart {
            product_id,
            quantity,
        } => serde_json::to_value(cart::add_to_cart(&app.catalog, &app.cart, product_id, quantity)?)?,
        Invoke::UpdateCartItem {
            product_id,
            quantity,
        } => serde_json::to_value(cart::update_cart_item(&app.cart, product_id, quantity))?,
        Invoke::RemoveFromCart { product_id } => {
            serde_json::to_value(cart::remove_from_cart(&app.cart, product_id))?
        }
        Invoke::ClearCart => serde_json::to_value(cart::clear_cart(&app.cart))?,
        Invoke::CartBadge => serde_json::to_value(cart::cart_badge(&app.cart))?,

        Invoke::Checkout { form } => serde_json::to_value(
            checkout::checkout(&app.cart, &app.session, &app.notifier, form).await?,
        )?,
        Invoke::ViewReceipt => serde_json::to_value(receipt::view_receipt(&app.session)?)?,

        Invoke::SubmitContact { form } => {
            serde_json::to_value(contact::submit_contact(&app.notifier, form).await?)?
        }
        Invoke::SubscribeNewsletter { email } => serde_json::to_value(
            contact::subscribe_newsletter(&app.notifier, NewsletterSignup { email }).await?,
        )?,

        Invoke::GetConfig => serde_json::to_value(config::get_config(&app.config))?,
    };

    Ok(value)
}

/// Parses, runs and answers one input line.
pub async fn handle_line(app: &Storefront, line: &str) -> String {
    let response = match serde_json::from_str::<Invoke>(line) {
        Ok(invoke) => match dispatch(app, invoke).await {
            Ok(value) => Response::Ok(value),
            Err(e) => Response::Error(e),
        },
        Err(e) => {
            warn!(error = %e, "Malformed command");
            Response::Error(ApiError::validation(format!("Invalid command: {}", e)))
        }
    };

    encode(&response)
}

/// Handles one raw input line, as read from the channel.
///
/// Blank lines get no response. Bytes that are not UTF-8 are answered with
/// `VALIDATION_ERROR` like any other malformed command.
pub async fn handle_bytes(app: &Storefront, raw: &[u8]) -> Option<String> {
    let line = match std::str::from_utf8(raw) {
        Ok(line) => line.trim(),
        Err(e) => {
            warn!(error = %e, "Command line is not valid UTF-8");
            let error = ApiError::validation(format!("Invalid command: {}", e));
            return Some(encode(&Response::Error(error)));
        }
    };

    if line.is_empty() {
        return None;
    }
    Some(handle_line(app, line).await)
}

/// Serializes one output line.
pub fn encode<T: Serialize>(message: &T) -> String {
    serde_json::to_string(message).unwrap_or_else(|e| {
        error!(error = %e, "Failed to encode output line");
        r#"{"error":{"code":"INTERNAL","message":"Failed to encode response"}}"#.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CatalogState, NotifierState, StorefrontConfig};
    use brew_notify::{MemoryNotifier, StoreIdentity};
    use std::sync::Arc;
    use std::time::Duration;

    fn storefront() -> (Storefront, Arc<MemoryNotifier>) {
        let memory = Arc::new(MemoryNotifier::new());
        let notifier = NotifierState::new(memory.clone(), StoreIdentity::default(), Duration::from_secs(1));
        let app = Storefront::new(
            StorefrontConfig::default(),
            CatalogState::bundled().unwrap(),
            notifier,
        );
        (app, memory)
    }

    async fn call(app: &Storefront, line: &str) -> Value {
        serde_json::from_str(&handle_line(app, line).await).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        let invoke: Invoke =
            serde_json::from_str(r#"{"cmd":"add_to_cart","productId":1,"quantity":2}"#).unwrap();
        assert_eq!(
            invoke,
            Invoke::AddToCart {
                product_id: 1,
                quantity: Some(2)
            }
        );

        let invoke: Invoke = serde_json::from_str(r#"{"cmd":"add_to_cart","productId":1}"#).unwrap();
        assert_eq!(
            invoke,
            Invoke::AddToCart {
                product_id: 1,
                quantity: None
            }
        );

        let invoke: Invoke = serde_json::from_str(r#"{"cmd":"get_cart"}"#).unwrap();
        assert_eq!(invoke, Invoke::GetCart);

        let invoke: Invoke =
            serde_json::from_str(r#"{"cmd":"list_products","category":"tea","sort":"price-asc"}"#)
                .unwrap();
        assert_eq!(
            invoke,
            Invoke::ListProducts {
                category: Some("tea".to_string()),
                search: None,
                sort: SortOrder::PriceAsc
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_line() {
        let (app, _) = storefront();
        let response = call(&app, "{not json").await;
        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");

        let response = call(&app, r#"{"cmd":"brew_espresso"}"#).await;
        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_cart_round_trip_over_the_channel() {
        let (app, _) = storefront();

        let response = call(&app, r#"{"cmd":"add_to_cart","productId":1,"quantity":2}"#).await;
        assert_eq!(response["ok"]["totals"]["totalItems"], 2);
        assert_eq!(response["ok"]["totals"]["subtotal"], 37.98);

        let response = call(&app, r#"{"cmd":"cart_badge"}"#).await;
        assert_eq!(response["ok"]["totalItems"], 2);

        let response = call(&app, r#"{"cmd":"add_to_cart","productId":99}"#).await;
        assert_eq!(response["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_checkout_then_receipt() {
        let (app, memory) = storefront();

        let response = call(&app, r#"{"cmd":"view_receipt"}"#).await;
        assert_eq!(response["ok"], serde_json::json!({"outcome": "redirect", "view": "home"}));

        call(&app, r#"{"cmd":"add_to_cart","productId":4,"quantity":1}"#).await;
        let checkout = call(
            &app,
            r#"{"cmd":"checkout","form":{"firstName":"Jo","lastName":"Doe","email":"jo@example.com",
                "address":"1 Bean St","city":"Portland","state":"OR","zipCode":"97201",
                "country":"USA","paymentMethod":"credit-card"}}"#,
        )
        .await;

        assert_eq!(checkout["ok"]["outcome"], "placed");
        assert_eq!(checkout["ok"]["emailSent"], true);
        let order_id = checkout["ok"]["order"]["id"].clone();

        let receipt = call(&app, r#"{"cmd":"view_receipt"}"#).await;
        assert_eq!(receipt["ok"]["outcome"], "receipt");
        assert_eq!(receipt["ok"]["order"]["id"], order_id);
        assert_eq!(receipt["ok"]["order"]["paymentMethod"], "credit-card");
        assert_eq!(receipt["ok"]["order"]["shippingAddress"]["zipCode"], "97201");

        let cart = call(&app, r#"{"cmd":"get_cart"}"#).await;
        assert_eq!(cart["ok"]["entries"], serde_json::json!([]));
        assert_eq!(memory.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_validation_reports_fields() {
        let (app, _) = storefront();
        call(&app, r#"{"cmd":"add_to_cart","productId":4}"#).await;

        let response = call(&app, r#"{"cmd":"checkout","form":{"email":"jo@"}}"#).await;

        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(response["error"]["fields"]["email"], "Invalid email address");
        assert_eq!(response["error"]["fields"]["firstName"], "First name is required");

        let cart = call(&app, r#"{"cmd":"cart_badge"}"#).await;
        assert_eq!(cart["ok"]["totalItems"], 1);
    }

    #[tokio::test]
    async fn test_config_over_the_channel() {
        let (app, _) = storefront();
        let response = call(&app, r#"{"cmd":"get_config"}"#).await;
        assert_eq!(response["ok"]["storeName"], "Bean & Brew");
        assert_eq!(response["ok"]["taxRateBps"], 800);
    }

    #[tokio::test]
    async fn test_non_utf8_line_is_rejected() {
        let (app, _) = storefront();

        let line = handle_bytes(&app, b"\xff\xfe\n").await.unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
        assert!(response["error"]["message"].as_str().unwrap().starts_with("Invalid command"));
    }

    #[tokio::test]
    async fn test_blank_line_gets_no_response() {
        let (app, _) = storefront();
        assert_eq!(handle_bytes(&app, b"  \r\n").await, None);

        let line = handle_bytes(&app, b"{\"cmd\":\"cart_badge\"}\r\n").await.unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["ok"]["totalItems"], 0);
    }

    #[test]
    fn test_event_shape() {
        let line = encode(&Event::CartUpdated {
            cart: CartSnapshot::default(),
        });
        let json: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(json["event"], "cart_updated");
        assert_eq!(json["cart"]["totals"]["totalItems"], 0);
    }
}

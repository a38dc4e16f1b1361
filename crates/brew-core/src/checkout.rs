//! # Checkout
//!
//! The checkout form, its validation, and the checkout state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Phases                                    │
//! │                                                                         │
//! │  ┌─────────┐ submit ┌────────────┐  valid   ┌────────────┐ complete     │
//! │  │ Editing │───────►│ Validating │─────────►│ Submitting │──────────┐   │
//! │  └─────────┘        └────────────┘          └────────────┘          │   │
//! │       ▲                   │ invalid                                 ▼   │
//! │       │             ┌─────▼──────┐                          ┌─────────┐ │
//! │       └─────────────│   Failed   │                          │ Success │ │
//! │      resume_editing └────────────┘                          └─────────┘ │
//! │      (errors stay attached)                                  terminal   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation reports every failing field at once. Checkout never charges a
//! card; `Submitting` covers order synthesis and the confirmation email.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, FormErrors};
use crate::order::ShippingAddress;
use crate::types::PaymentMethod;
use crate::validation::{validate_email, validate_min_length, validate_one_of, validate_required};
use crate::MIN_ZIP_LENGTH;

// =============================================================================
// Checkout Form
// =============================================================================

/// Raw checkout form input, exactly as the page submits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    /// `credit-card` or `paypal`. Kept as text so an unknown value is a
    /// field error rather than a deserialization failure.
    pub payment_method: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        CheckoutForm {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: String::new(),
            payment_method: PaymentMethod::CreditCard.as_str().to_string(),
        }
    }
}

/// A checkout form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCheckout {
    pub email: String,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Checks every field and reports all failures together.
    ///
    /// ## Rules
    /// | Field | Rule | Message |
    /// |-------|------|---------|
    /// | firstName, lastName, address, city, state, country | non-blank | "First name is required", ... |
    /// | email | email format | "Invalid email address" |
    /// | zipCode | at least 5 characters | "Valid ZIP code is required" |
    /// | paymentMethod | credit-card or paypal | "Payment method must be one of: ..." |
    pub fn validate(&self) -> Result<ValidCheckout, FormErrors> {
        let mut errors = FormErrors::new();

        errors.check(validate_required("firstName", "First name", &self.first_name));
        errors.check(validate_required("lastName", "Last name", &self.last_name));
        errors.check(validate_email("email", &self.email));
        errors.check(validate_required("address", "Address", &self.address));
        errors.check(validate_required("city", "City", &self.city));
        errors.check(validate_required("state", "State", &self.state));
        errors.check(validate_min_length("zipCode", "ZIP code", &self.zip_code, MIN_ZIP_LENGTH));
        errors.check(validate_required("country", "Country", &self.country));

        let payment_method = self.payment_method.parse::<PaymentMethod>().ok();
        if payment_method.is_none() {
            let allowed = PaymentMethod::ALL.map(|method| method.as_str());
            errors.check(validate_one_of(
                "paymentMethod",
                "Payment method",
                &self.payment_method,
                &allowed,
            ));
        }

        let (Some(payment_method), true) = (payment_method, errors.is_empty()) else {
            return Err(errors);
        };

        Ok(ValidCheckout {
            email: self.email.trim().to_string(),
            shipping_address: ShippingAddress {
                name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
                address: self.address.trim().to_string(),
                city: self.city.trim().to_string(),
                state: self.state.trim().to_string(),
                zip_code: self.zip_code.trim().to_string(),
                country: self.country.trim().to_string(),
            },
            payment_method,
        })
    }
}

// =============================================================================
// Checkout State Machine
// =============================================================================

/// Where a checkout attempt currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Form is open. Carries the errors of the previous failed attempt.
    Editing { errors: FormErrors },
    Validating,
    /// Form passed; the order is being placed.
    Submitting,
    /// Order placed. Terminal.
    Success { order_id: String },
    /// Form failed validation.
    Failed { errors: FormErrors },
}

impl CheckoutPhase {
    pub const fn name(&self) -> &'static str {
        match self {
            CheckoutPhase::Editing { .. } => "editing",
            CheckoutPhase::Validating => "validating",
            CheckoutPhase::Submitting => "submitting",
            CheckoutPhase::Success { .. } => "success",
            CheckoutPhase::Failed { .. } => "failed",
        }
    }
}

/// Drives one checkout attempt through [`CheckoutPhase`].
///
/// ## Example
/// ```rust
/// use brew_core::checkout::{CheckoutFlow, CheckoutForm, CheckoutPhase};
///
/// let mut flow = CheckoutFlow::new();
/// assert!(flow.submit(&CheckoutForm::default()).is_err());
/// assert_eq!(flow.phase().name(), "failed");
///
/// flow.resume_editing().unwrap();
/// assert!(matches!(flow.phase(), CheckoutPhase::Editing { errors } if !errors.is_empty()));
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        CheckoutFlow {
            phase: CheckoutPhase::Editing {
                errors: FormErrors::new(),
            },
        }
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// Editing → Validating → Submitting (valid) or Failed (invalid).
    ///
    /// ## Errors
    /// - `InvalidForm` with every failing field; the flow is left in `Failed`
    /// - `InvalidTransition` when not editing
    pub fn submit(&mut self, form: &CheckoutForm) -> CoreResult<ValidCheckout> {
        self.expect_phase("submit", |phase| matches!(phase, CheckoutPhase::Editing { .. }))?;
        self.transition(CheckoutPhase::Validating);

        match form.validate() {
            Ok(valid) => {
                self.transition(CheckoutPhase::Submitting);
                Ok(valid)
            }
            Err(errors) => {
                self.transition(CheckoutPhase::Failed {
                    errors: errors.clone(),
                });
                Err(CoreError::InvalidForm(errors))
            }
        }
    }

    /// Failed → Editing, keeping the field errors for display.
    pub fn resume_editing(&mut self) -> CoreResult<()> {
        self.expect_phase("resume editing", |phase| matches!(phase, CheckoutPhase::Failed { .. }))?;

        let errors = match std::mem::replace(&mut self.phase, CheckoutPhase::Validating) {
            CheckoutPhase::Failed { errors } => errors,
            _ => FormErrors::new(),
        };
        self.transition(CheckoutPhase::Editing { errors });
        Ok(())
    }

    /// Submitting → Success.
    pub fn complete(&mut self, order_id: impl Into<String>) -> CoreResult<()> {
        self.expect_phase("complete", |phase| matches!(phase, CheckoutPhase::Submitting))?;
        self.transition(CheckoutPhase::Success {
            order_id: order_id.into(),
        });
        Ok(())
    }

    fn expect_phase(&self, action: &'static str, allowed: impl Fn(&CheckoutPhase) -> bool) -> CoreResult<()> {
        if allowed(&self.phase) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                phase: self.phase.name(),
                action,
            })
        }
    }

    fn transition(&mut self, next: CheckoutPhase) {
        debug!(from = self.phase.name(), to = next.name(), "checkout transition");
        self.phase = next;
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Domain-specific error types for brew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brew-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - One field failed one rule                      │
//! │  └── FormErrors       - Every failing field of a submitted form        │
//! │                                                                         │
//! │  brew-session errors   └── SessionError  (stored receipt I/O)          │
//! │  brew-notify errors    └── NotifyError   (email delivery)              │
//! │                                                                         │
//! │  Storefront API errors (in app)                                        │
//! │  └── ApiError         - What the page layer sees (serialized)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, product id)
//! 3. Errors are enum variants, never String
//! 4. Form validation reports all fields at once, never just the first

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A submitted form failed validation on one or more fields.
    #[error("{0}")]
    InvalidForm(FormErrors),

    /// A checkout step was requested from a phase that does not allow it.
    #[error("Cannot {action} while checkout is {phase}")]
    InvalidTransition {
        phase: &'static str,
        action: &'static str,
    },

    /// Catalog file content is unusable.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl From<FormErrors> for CoreError {
    fn from(errors: FormErrors) -> Self {
        CoreError::InvalidForm(errors)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The `Display` output is the inline message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{label} is required")]
    Required { field: String, label: String },

    /// Field value is too short.
    #[error("Valid {label} is required")]
    TooShort { field: String, label: String, min: usize },

    /// Email address does not look like one.
    #[error("Invalid email address")]
    InvalidEmail { field: String },

    /// Numeric value is out of range.
    #[error("{label} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        label: String,
        min: i64,
        max: i64,
    },

    /// Value is not in allowed set.
    #[error("{label} must be one of: {}", .allowed.join(", "))]
    NotAllowed {
        field: String,
        label: String,
        allowed: Vec<String>,
    },
}

impl ValidationError {
    /// The form field this error belongs to (camelCase, as the form names it).
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field, .. }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidEmail { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Form Errors
// =============================================================================

/// Every field-level failure of one form submission.
///
/// Serializes as a `{ field: message }` map, the shape the page layer uses to
/// attach messages to inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<ValidationError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one field check. Only the first failure per
    /// field is kept.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            if self.get(err.field()).is_none() {
                self.errors.push(err);
            }
        }
    }

    pub fn push(&mut self, err: ValidationError) {
        self.check(Err(err));
    }

    /// Returns the error recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

impl Serialize for FormErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for err in &self.errors {
            map.serialize_entry(err.field(), &err.to_string())?;
        }
        map.end()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn required(field: &str, label: &str) -> ValidationError {
        ValidationError::Required {
            field: field.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(required("firstName", "First name").to_string(), "First name is required");

        let err = ValidationError::TooShort {
            field: "zipCode".to_string(),
            label: "ZIP code".to_string(),
            min: 5,
        };
        assert_eq!(err.to_string(), "Valid ZIP code is required");
        assert_eq!(err.field(), "zipCode");
    }

    #[test]
    fn test_form_errors_keep_first_error_per_field() {
        let mut errors = FormErrors::new();
        errors.push(required("email", "Email"));
        errors.push(ValidationError::InvalidEmail {
            field: "email".to_string(),
        });
        errors.check(Ok(()));
        errors.push(required("city", "City"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email").unwrap().to_string(), "Email is required");
    }

    #[test]
    fn test_form_errors_serialize_as_map() {
        let mut errors = FormErrors::new();
        errors.push(required("firstName", "First name"));
        errors.push(required("city", "City"));

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["firstName"], "First name is required");
        assert_eq!(json["city"], "City is required");
    }

    #[test]
    fn test_form_errors_convert_to_core_error() {
        let mut errors = FormErrors::new();
        errors.push(required("city", "City"));
        let core_err: CoreError = errors.into();
        assert!(matches!(core_err, CoreError::InvalidForm(_)));
    }
}

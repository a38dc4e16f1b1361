//! # Validation Module
//!
//! Field validators shared by every storefront form (checkout, contact,
//! review, newsletter).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page layer                                                    │
//! │  └── Input types, required markers, immediate feedback                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command deserialization (serde)                               │
//! │  └── Shape and primitive types                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                   │
//! │  └── Business rules, one ValidationError per failing field              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each validator checks one field and returns `Ok(())` or the error the page
//! layer shows inline. Form types feed the results into
//! [`FormErrors::check`](crate::error::FormErrors::check) so a single
//! submission reports every failing field.
//!
//! ## Usage
//! ```rust
//! use brew_core::validation::{validate_email, validate_required};
//!
//! assert!(validate_required("city", "City", "Portland").is_ok());
//! assert!(validate_required("city", "City", "   ").is_err());
//! assert!(validate_email("email", "jo@example.com").is_ok());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is not blank.
pub fn validate_required(field: &str, label: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
            label: label.to_string(),
        });
    }

    Ok(())
}

/// Validates that a text field has at least `min` characters.
///
/// ## Example
/// ```rust
/// use brew_core::validation::validate_min_length;
///
/// assert!(validate_min_length("zipCode", "ZIP code", "97201", 5).is_ok());
/// assert!(validate_min_length("zipCode", "ZIP code", "972", 5).is_err());
/// ```
pub fn validate_min_length(field: &str, label: &str, value: &str, min: usize) -> ValidationResult<()> {
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            label: label.to_string(),
            min,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - No whitespace
/// - Exactly one `@` with a non-empty local part
/// - Domain has at least one dot, and no empty labels (`a@.com`, `a@b.`)
///
/// ## Example
/// ```rust
/// use brew_core::validation::validate_email;
///
/// assert!(validate_email("email", "jo@beanandbrew.com").is_ok());
/// assert!(validate_email("email", "jo@localhost").is_err());
/// assert!(validate_email("email", "").is_err());
/// ```
pub fn validate_email(field: &str, value: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidEmail {
        field: field.to_string(),
    };

    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(invalid());
    }

    if domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a review star rating (1 to 5).
pub fn validate_rating(field: &str, rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            label: "Rating".to_string(),
            min: 1,
            max: 5,
        });
    }

    Ok(())
}

// =============================================================================
// Choice Validators
// =============================================================================

/// Validates that `value` is one of `allowed`.
pub fn validate_one_of(field: &str, label: &str, value: &str, allowed: &[&str]) -> ValidationResult<()> {
    if !allowed.contains(&value) {
        return Err(ValidationError::NotAllowed {
            field: field.to_string(),
            label: label.to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

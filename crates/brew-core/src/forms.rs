//! # Customer Forms
//!
//! The contact form and the newsletter signup. Both end in an email, so they
//! only validate here and hand a cleaned value to the notifier.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::FormErrors;
use crate::validation::{validate_email, validate_required};

/// Contact page submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Blank email reads "Email is required"; a malformed one
    /// "Invalid email address".
    pub fn validate(&self) -> Result<ContactForm, FormErrors> {
        let mut errors = FormErrors::new();
        errors.check(validate_required("name", "Name", &self.name));
        errors.check(validate_required("email", "Email", &self.email));
        errors.check(validate_email("email", &self.email));
        errors.check(validate_required("subject", "Subject", &self.subject));
        errors.check(validate_required("message", "Message", &self.message));
        errors.into_result()?;

        Ok(ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

/// Footer newsletter signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NewsletterSignup {
    pub email: String,
}

impl NewsletterSignup {
    /// Returns the trimmed address.
    pub fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        errors.check(validate_email("email", &self.email));
        errors.into_result()?;
        Ok(self.email.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactForm {
        ContactForm {
            name: " Ada ".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Wholesale".to_string(),
            message: "Do you sell 5kg bags?".to_string(),
        }
    }

    #[test]
    fn test_contact_valid_is_trimmed() {
        let valid = contact().validate().unwrap();
        assert_eq!(valid.name, "Ada");
    }

    #[test]
    fn test_contact_email_messages() {
        let blank = ContactForm {
            email: "  ".to_string(),
            ..contact()
        };
        let errors = blank.validate().unwrap_err();
        assert_eq!(errors.get("email").unwrap().to_string(), "Email is required");

        let malformed = ContactForm {
            email: "ada@example".to_string(),
            ..contact()
        };
        let errors = malformed.validate().unwrap_err();
        assert_eq!(errors.get("email").unwrap().to_string(), "Invalid email address");
    }

    #[test]
    fn test_contact_reports_all_fields() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("message").unwrap().to_string(), "Message is required");
    }

    #[test]
    fn test_newsletter() {
        let signup = NewsletterSignup {
            email: " jo@example.com ".to_string(),
        };
        assert_eq!(signup.validate().unwrap(), "jo@example.com");
        assert!(NewsletterSignup::default().validate().is_err());
    }
}

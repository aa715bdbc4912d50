//! Declarative sign-up schema and its pure validation function
//!
//! The schema is the single source of truth for both the runtime checks and
//! the typed value they imply: `validate` either produces a [`SignupData`]
//! or a list of per-field violations, with no side effects.

use std::str::FromStr;

use email_address::EmailAddress;
use serde::Serialize;

use crate::form::{FieldId, FieldValues};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A single constraint failure attributed to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: FieldId,
    pub message: String,
}

impl Violation {
    fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The validated form data. Holding an [`EmailAddress`] rather than a raw
/// string means a `SignupData` cannot exist with an unparsed email.
#[derive(Debug, Clone)]
pub struct SignupData {
    pub email: EmailAddress,
    pub password: String,
}

impl SignupData {
    /// Serializable record for logging an accepted sign-up. The raw password
    /// never leaves the process, only its length.
    pub fn record(&self) -> SignupRecord<'_> {
        SignupRecord {
            email: self.email.as_str(),
            password_len: self.password.chars().count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignupRecord<'a> {
    pub email: &'a str,
    pub password_len: usize,
}

/// Validate a candidate value set against the sign-up schema.
///
/// Pure and re-entrant: same input, same output. Produces at most one
/// violation per field per pass, so repeated submissions of the same invalid
/// values can never accumulate duplicate messages.
pub fn validate(values: &FieldValues) -> Result<SignupData, Vec<Violation>> {
    let mut violations = Vec::new();

    let email = match EmailAddress::from_str(values.email.trim()) {
        Ok(email) => Some(email),
        Err(_) => {
            violations.push(Violation::new(FieldId::Email, "Invalid email address"));
            None
        }
    };

    if values.password.chars().count() < MIN_PASSWORD_LEN {
        violations.push(Violation::new(
            FieldId::Password,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    match (email, violations.is_empty()) {
        (Some(email), true) => Ok(SignupData {
            email,
            password: values.password.clone(),
        }),
        _ => Err(violations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(email: &str, password: &str) -> FieldValues {
        FieldValues {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_values_produce_typed_data() {
        let data = validate(&values("a@b.com", "12345678")).unwrap();
        assert_eq!(data.email.as_str(), "a@b.com");
        assert_eq!(data.password, "12345678");
    }

    #[test]
    fn test_default_placeholder_email_fails() {
        // The form pre-populates email with "@", which must not validate.
        let violations = validate(&values("@", "12345678")).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, FieldId::Email);
        assert_eq!(violations[0].message, "Invalid email address");
    }

    #[test]
    fn test_malformed_emails_fail() {
        for email in ["", "plain", "missing@tld@", "a b@c.com"] {
            let violations = validate(&values(email, "12345678")).unwrap_err();
            assert!(
                violations.iter().any(|v| v.field == FieldId::Email),
                "expected email violation for {:?}",
                email
            );
        }
    }

    #[test]
    fn test_short_password_fails() {
        let violations = validate(&values("a@b.com", "1234567")).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, FieldId::Password);
        assert_eq!(
            violations[0].message,
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn test_password_length_counts_characters_not_bytes() {
        // 8 multi-byte characters must pass.
        assert!(validate(&values("a@b.com", "ぱすわーど・八字")).is_ok());
    }

    #[test]
    fn test_both_fields_invalid_reports_both() {
        let violations = validate(&values("@", "short")).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, FieldId::Email);
        assert_eq!(violations[1].field, FieldId::Password);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let first = validate(&values("@", "short")).unwrap_err();
        let second = validate(&values("@", "short")).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn test_record_hides_raw_password() {
        let data = validate(&values("a@b.com", "12345678")).unwrap();
        let json = serde_json::to_string(&data.record()).unwrap();
        assert!(json.contains("a@b.com"));
        assert!(!json.contains("12345678"));
    }
}

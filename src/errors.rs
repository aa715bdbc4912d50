//! Submission error types

use thiserror::Error;

use crate::form::{ErrorKey, FieldId};

/// Errors produced by the asynchronous submission handler after validation
/// has already passed. Each variant knows which error slot it belongs to so
/// the form controller can route its message to the right inline display.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Email is already taken")]
    EmailTaken,

    #[error("Sign-up service is unavailable, try again later")]
    ServiceUnavailable,

    #[error("Failed to serialize sign-up record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SubmitError {
    /// The error slot this rejection should be displayed under.
    pub fn error_key(&self) -> ErrorKey {
        match self {
            SubmitError::EmailTaken => ErrorKey::Field(FieldId::Email),
            SubmitError::ServiceUnavailable => ErrorKey::Root,
            SubmitError::Serialize(_) => ErrorKey::Root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_taken_targets_email_field() {
        let err = SubmitError::EmailTaken;
        assert_eq!(err.error_key(), ErrorKey::Field(FieldId::Email));
        assert_eq!(err.to_string(), "Email is already taken");
    }

    #[test]
    fn test_service_errors_target_root_slot() {
        assert_eq!(
            SubmitError::ServiceUnavailable.error_key(),
            ErrorKey::Root
        );
    }
}

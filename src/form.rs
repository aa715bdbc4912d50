//! Form state controller
//!
//! Owns the field value buffers, the error set, and the submission flag, and
//! wraps the submit lifecycle: validate, run the async handler, route any
//! rejection back into the error set. Field buffers are mutated directly on
//! keystrokes and only read out at submit time.

use std::collections::BTreeMap;
use std::future::Future;

use crate::errors::SubmitError;
use crate::schema::{self, SignupData};
use crate::tui::ui::InputField;

/// Identifies one of the form's input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldId {
    Email,
    Password,
}

impl FieldId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Email => "email",
            FieldId::Password => "password",
        }
    }
}

/// Slot an error message is displayed under: beneath a specific field, or in
/// the root slot for messages not attributable to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorKey {
    Field(FieldId),
    Root,
}

/// Snapshot of the current field buffers, handed to schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues {
    pub email: String,
    pub password: String,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the handler was not invoked.
    Invalid,
    /// The handler ran and resolved.
    Accepted,
    /// The handler ran and rejected; the rejection is now in the error set.
    Rejected,
}

/// State for the sign-up form: two input fields, the error set, and the
/// in-flight submission flag.
pub struct FormState {
    email: InputField,
    password: InputField,
    errors: BTreeMap<ErrorKey, String>,
    is_submitting: bool,
}

impl FormState {
    pub fn new(default_email: &str) -> Self {
        Self {
            email: InputField::new("Email")
                .with_placeholder("Enter email..")
                .with_value(default_email),
            password: InputField::new("Password")
                .with_placeholder("Enter password")
                .masked(),
            errors: BTreeMap::new(),
            is_submitting: false,
        }
    }

    pub fn field(&self, id: FieldId) -> &InputField {
        match id {
            FieldId::Email => &self.email,
            FieldId::Password => &self.password,
        }
    }

    fn field_mut(&mut self, id: FieldId) -> &mut InputField {
        match id {
            FieldId::Email => &mut self.email,
            FieldId::Password => &mut self.password,
        }
    }

    pub fn set_field_focus(&mut self, id: FieldId, focused: bool) {
        self.field_mut(id).set_focus(focused);
    }

    /// Insert a character into a field. Editing a field clears that field's
    /// error; other fields' errors persist until the next submit.
    pub fn handle_char(&mut self, id: FieldId, c: char) {
        self.field_mut(id).insert_char(c);
        self.errors.remove(&ErrorKey::Field(id));
    }

    pub fn handle_backspace(&mut self, id: FieldId) {
        self.field_mut(id).delete_char();
        self.errors.remove(&ErrorKey::Field(id));
    }

    pub fn handle_delete(&mut self, id: FieldId) {
        self.field_mut(id).delete_char_forward();
        self.errors.remove(&ErrorKey::Field(id));
    }

    pub fn move_cursor_left(&mut self, id: FieldId) {
        self.field_mut(id).move_cursor_left();
    }

    pub fn move_cursor_right(&mut self, id: FieldId) {
        self.field_mut(id).move_cursor_right();
    }

    pub fn move_cursor_home(&mut self, id: FieldId) {
        self.field_mut(id).move_cursor_to_start();
    }

    pub fn move_cursor_end(&mut self, id: FieldId) {
        self.field_mut(id).move_cursor_to_end();
    }

    /// Snapshot the current buffers for validation.
    pub fn values(&self) -> FieldValues {
        FieldValues {
            email: self.email.value.clone(),
            password: self.password.value.clone(),
        }
    }

    pub fn error_for(&self, key: ErrorKey) -> Option<&str> {
        self.errors.get(&key).map(String::as_str)
    }

    pub fn has_error(&self, id: FieldId) -> bool {
        self.errors.contains_key(&ErrorKey::Field(id))
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Attribute a post-hoc error to a specific field, e.g. a backend
    /// rejection arriving after the async round-trip.
    pub fn set_field_error(&mut self, id: FieldId, message: impl Into<String>) {
        self.errors.insert(ErrorKey::Field(id), message.into());
    }

    /// Attribute a post-hoc error to the root slot.
    pub fn set_root_error(&mut self, message: impl Into<String>) {
        self.errors.insert(ErrorKey::Root, message.into());
    }

    /// Start a submit attempt: clear the error set and validate the current
    /// buffers. Returns the validated data and raises the submitting flag,
    /// or records the violations and returns `None` without invoking any
    /// handler.
    pub fn begin_submit(&mut self) -> Option<SignupData> {
        self.errors.clear();
        match schema::validate(&self.values()) {
            Ok(data) => {
                self.is_submitting = true;
                Some(data)
            }
            Err(violations) => {
                for violation in violations {
                    self.errors
                        .insert(ErrorKey::Field(violation.field), violation.message);
                }
                None
            }
        }
    }

    /// Complete a submit attempt: drop the submitting flag and route a
    /// rejection into the error set. Rejections never propagate further.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) -> SubmitOutcome {
        self.is_submitting = false;
        match result {
            Ok(()) => SubmitOutcome::Accepted,
            Err(err) => {
                self.errors.insert(err.error_key(), err.to_string());
                SubmitOutcome::Rejected
            }
        }
    }

    /// Full submit lifecycle: validate, await the handler with the
    /// submitting flag raised, and map the result into the error set.
    pub async fn submit<F, Fut>(&mut self, on_valid: F) -> SubmitOutcome
    where
        F: FnOnce(SignupData) -> Fut,
        Fut: Future<Output = Result<(), SubmitError>>,
    {
        match self.begin_submit() {
            Some(data) => {
                let result = on_valid(data).await;
                self.finish_submit(result)
            }
            None => SubmitOutcome::Invalid,
        }
    }
}

//! Field-level validation for admin drafts and public forms.
//!
//! Validation collects every failing field instead of stopping at the
//! first one, so a form can highlight all of them at once. A non-empty
//! [`FieldErrors`] always means "do not send this to the store".

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Minimum length of a contact-form sender name.
pub const CONTACT_NAME_MIN: usize = 2;
/// Minimum length of a contact-form subject.
pub const CONTACT_SUBJECT_MIN: usize = 5;
/// Minimum length of a contact-form message body.
pub const CONTACT_MESSAGE_MIN: usize = 10;
/// Minimum password length for sign-in and sign-up.
pub const PASSWORD_MIN: usize = 6;
/// Minimum length of the full name given at sign-up.
pub const FULL_NAME_MIN: usize = 2;

/// One failing field and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of field failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether `field` has at least one failure.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

// ---------------------------------------------------------------------------
// Primitive checks
// ---------------------------------------------------------------------------

/// Require a present, non-blank text value.
pub fn require_text(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    match value {
        Some(v) if !v.trim().is_empty() => {}
        _ => errors.push(field, format!("{field} is required")),
    }
}

/// Require a present number that is zero or greater.
pub fn require_non_negative(errors: &mut FieldErrors, field: &str, value: Option<f64>) {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => {}
        Some(_) => errors.push(field, format!("{field} must be a non-negative number")),
        None => errors.push(field, format!("{field} is required")),
    }
}

/// Require at least `min` characters (after trimming).
pub fn min_chars(errors: &mut FieldErrors, field: &str, value: &str, min: usize, label: &str) {
    if value.trim().chars().count() < min {
        errors.push(field, format!("{label} must be at least {min} characters"));
    }
}

/// Require a syntactically valid email address.
pub fn email(errors: &mut FieldErrors, field: &str, value: &str) {
    if !value.trim().validate_email() {
        errors.push(field, "Please enter a valid email address");
    }
}

// ---------------------------------------------------------------------------
// Form rules
// ---------------------------------------------------------------------------

/// Rules for the public contact form.
pub fn validate_contact(name: &str, email_addr: &str, subject: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    min_chars(&mut errors, "name", name, CONTACT_NAME_MIN, "Name");
    email(&mut errors, "email", email_addr);
    min_chars(&mut errors, "subject", subject, CONTACT_SUBJECT_MIN, "Subject");
    min_chars(&mut errors, "message", message, CONTACT_MESSAGE_MIN, "Message");
    errors
}

/// Rules for signing in.
pub fn validate_sign_in(email_addr: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    email(&mut errors, "email", email_addr);
    if password.chars().count() < PASSWORD_MIN {
        errors.push(
            "password",
            format!("Password must be at least {PASSWORD_MIN} characters"),
        );
    }
    errors
}

/// Rules for creating an account.
pub fn validate_sign_up(full_name: &str, email_addr: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    min_chars(&mut errors, "full_name", full_name, FULL_NAME_MIN, "Full name");
    for e in validate_sign_in(email_addr, password).0 {
        errors.0.push(e);
    }
    errors
}

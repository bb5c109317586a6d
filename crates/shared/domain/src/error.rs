//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (CLI, database).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single rejected field together with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

/// Field-level validation report attached to a rejected entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report containing exactly one failure
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, reason);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether any failure was recorded for `field`
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Reasons recorded for `field`, in insertion order
    pub fn reasons_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.reason.as_str())
    }

    /// `Ok(())` when nothing was reported, otherwise a validation error.
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", e.field, e.reason)?;
        }
        Ok(())
    }
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// One or more fields failed validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Password hashing or salt handling failed
    #[error("Password error: {0}")]
    Password(String),
}

impl DomainError {
    /// Create a single-field validation error
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::Validation(FieldErrors::single(field, reason))
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn report_lists_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.add("name", "is too short");
        errors.add("email", "is invalid");

        assert_eq!(errors.to_string(), "name is too short, email is invalid");
        assert!(errors.has("email"));
        assert!(!errors.has("password"));
    }

    #[test]
    fn non_empty_report_becomes_validation_error() {
        let err = FieldErrors::single("email", "is invalid")
            .into_result()
            .unwrap_err();

        match err {
            DomainError::Validation(errors) => {
                assert_eq!(errors.reasons_for("email").collect::<Vec<_>>(), ["is invalid"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

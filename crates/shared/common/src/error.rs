//! Unified error handling.
//!
//! Provides a single error type for service and storage failures, with
//! stable error codes and user-facing messages that hide internal details.

use domain::{DomainError, FieldErrors};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller's input caused the failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound | AppError::Validation(_) | AppError::BadRequest(_)
        )
    }

    /// Field-level report, when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(errors) => errors.to_string(),
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Password(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation(FieldErrors::single(field, reason))
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields() {
        let err = AppError::invalid("email", "has already been taken");

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.user_message(), "email has already been taken");
        assert!(err.is_client_error());
        assert!(err.field_errors().is_some_and(|e| e.has("email")));
    }

    #[test]
    fn internal_message_is_hidden() {
        let err = AppError::internal("salt decode failed");

        assert_eq!(err.user_message(), "An internal error occurred");
        assert!(!err.is_client_error());
    }

    #[test]
    fn domain_errors_map_to_app_errors() {
        let err: AppError = DomainError::invalid("name", "is too short").into();
        assert!(matches!(err, AppError::Validation(_)));

        let err: AppError = DomainError::password("bad salt").into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn option_ext_maps_none_to_not_found() {
        let missing: Option<u8> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(1).ok_or_not_found().unwrap(), 1);
    }
}

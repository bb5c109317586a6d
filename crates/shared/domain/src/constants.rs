//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Email address pattern: `local@domain.tld`, ASCII only so that SQL `LOWER`
/// and [`normalize_email`](crate::normalize_email) agree on case.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9_+\-.]+@[A-Za-z0-9\-.]+\.[A-Za-z]+$";

/// Field names used in validation reports
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";

/// Reason reported when a required field is missing or whitespace
pub const REASON_BLANK: &str = "can't be blank";

/// Reason reported when another user already holds an email address
pub const REASON_EMAIL_TAKEN: &str = "has already been taken";

/// Reason reported when the password confirmation differs
pub const REASON_CONFIRMATION_MISMATCH: &str = "doesn't match confirmation";

// =============================================================================
// Avatars
// =============================================================================

/// Default avatar edge length in pixels
pub const DEFAULT_AVATAR_SIZE: u32 = 50;

/// CSS class applied to rendered avatar images
pub const AVATAR_CSS_CLASS: &str = "gravatar";

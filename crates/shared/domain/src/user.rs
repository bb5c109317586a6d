//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::password::Password;
use crate::validation::EMAIL_REGEX;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub encrypted_password: String,
    #[serde(skip_serializing)]
    pub salt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a user from freshly hashed credentials.
    pub fn new(id: Uuid, name: String, email: String, password: Password) -> Self {
        let now = Utc::now();
        let (encrypted_password, salt) = password.into_parts();
        Self {
            id,
            name,
            email,
            encrypted_password,
            salt,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `candidate` hashes, under this user's salt, to the stored
    /// encrypted password.
    pub fn has_password(&self, candidate: &str) -> bool {
        Password::matches(candidate, &self.encrypted_password, &self.salt)
    }
}

/// Email in the form used for uniqueness checks, lookups and avatars.
///
/// Folds ASCII case only, matching `LOWER(email)` on every backend.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// User registration input.
#[derive(Clone, Deserialize, Validate)]
pub struct NewUser {
    /// Display name (2 to 50 characters)
    #[validate(length(min = 2, max = 50, message = "must be between 2 and 50 characters"))]
    pub name: String,
    /// Email address
    #[validate(regex(path = *EMAIL_REGEX, message = "is invalid"))]
    pub email: String,
    /// Password (6 to 40 characters)
    #[validate(length(min = 6, max = 40, message = "must be between 6 and 40 characters"))]
    pub password: String,
    /// Must equal `password`
    pub password_confirmation: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirmation", &"[REDACTED]")
            .finish()
    }
}

/// User update input. Only supplied fields are changed and validated.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    /// New display name
    #[validate(length(min = 2, max = 50, message = "must be between 2 and 50 characters"))]
    pub name: Option<String>,
    /// New email address
    #[validate(regex(path = *EMAIL_REGEX, message = "is invalid"))]
    pub email: Option<String>,
    /// New password
    #[validate(length(min = 6, max = 40, message = "must be between 6 and 40 characters"))]
    pub password: Option<String>,
    /// Required whenever `password` is supplied
    pub password_confirmation: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

impl std::fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("UpdateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &redacted(&self.password))
            .field("password_confirmation", &redacted(&self.password_confirmation))
            .finish()
    }
}

/// User profile (safe to show)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity, its validation rules and password hashing.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult, FieldError, FieldErrors};
pub use password::Password;
pub use user::{normalize_email, NewUser, UpdateUser, User, UserResponse};
pub use validation::{validate_new_user, validate_update_user};

//! User service - registration, profile updates and credential checks.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    validate_new_user, validate_update_user, NewUser, Password, UpdateUser, User, FIELD_EMAIL,
    REASON_EMAIL_TAKEN,
};

use crate::repository::{UserChanges, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and register a new user
    async fn create_user(&self, input: NewUser) -> AppResult<User>;

    /// Re-validate and apply the supplied fields
    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Find user by email, ignoring case
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// The user owning `email` if `password` is theirs, otherwise `None`.
    /// Unknown emails and wrong passwords are indistinguishable.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Whether a user other than `except` already holds `email`
    async fn email_taken(&self, email: &str, except: Option<Uuid>) -> AppResult<bool> {
        if email.is_empty() {
            return Ok(false);
        }
        let existing = self.repo.find_by_email(email).await?;
        Ok(existing.is_some_and(|user| Some(user.id) != except))
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, input: NewUser) -> AppResult<User> {
        let mut errors = validate_new_user(&input);
        if self.email_taken(&input.email, None).await? {
            errors.add(FIELD_EMAIL, REASON_EMAIL_TAKEN);
        }
        if !errors.is_empty() {
            tracing::debug!("Registration rejected: {}", errors);
            return Err(AppError::Validation(errors));
        }

        let password = Password::new(&input.password)?;
        let user = self.repo.create(input.name, input.email, password).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        let current = self.get_user(id).await?;
        if input.is_empty() {
            return Ok(current);
        }

        let mut errors = validate_update_user(&input);
        if let Some(email) = &input.email {
            if self.email_taken(email, Some(current.id)).await? {
                errors.add(FIELD_EMAIL, REASON_EMAIL_TAKEN);
            }
        }
        errors.into_result()?;

        let password = input.password.as_deref().map(Password::new).transpose()?;
        let changes = UserChanges {
            name: input.name,
            email: input.email,
            password,
        };

        let user = self.repo.update(id, changes).await?;
        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            // Result unused on purpose: the hash alone makes an unknown email
            // cost the same as a wrong password. Keep this call.
            let _ = Password::new(password);
            tracing::debug!("Authentication failed");
            return Ok(None);
        };

        if user.has_password(password) {
            tracing::debug!(user_id = %user.id, "Authentication succeeded");
            Ok(Some(user))
        } else {
            tracing::debug!("Authentication failed");
            Ok(None)
        }
    }
}

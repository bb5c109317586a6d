//! User repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{normalize_email, Password, User, FIELD_EMAIL, REASON_EMAIL_TAKEN};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Column changes applied by [`UserRepository::update`].
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<Password>,
}

/// User repository trait for dependency injection.
///
/// Email lookups ignore case.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address, ignoring case
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user with already hashed credentials
    async fn create(&self, name: String, email: String, password: Password) -> AppResult<User>;

    /// Apply changes to an existing user
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// List all users, oldest first
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(email_matches(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, name: String, email: String, password: Password) -> AppResult<User> {
        let now = chrono::Utc::now();
        let (encrypted_password, salt) = password.into_parts();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            encrypted_password: Set(encrypted_password),
            salt: Set(salt),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(write_error)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = user.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password) = changes.password {
            let (encrypted_password, salt) = password.into_parts();
            active.encrypted_password = Set(encrypted_password);
            active.salt = Set(salt);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(write_error)?;
        Ok(User::from(model))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}

/// `LOWER(email) = <normalized email>`
fn email_matches(email: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(user::Column::Email))).eq(normalize_email(email))
}

/// Map a failed insert/update. A unique violation here means another row
/// already holds the email, which is reported like the service-level check.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!("Duplicate email rejected by database: {}", detail);
            AppError::invalid(FIELD_EMAIL, REASON_EMAIL_TAKEN)
        }
        _ => AppError::from(err),
    }
}

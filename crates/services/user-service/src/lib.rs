//! User Service Library
//!
//! User registration, credential verification and profile display backed
//! by a relational `users` table.
//!
//! # Layers
//!
//! - **cli** / **commands**: command-line entry points
//! - **config**: environment-driven configuration
//! - **helpers**: profile presentation (Gravatar avatars)
//! - **infra**: database connection and migrations
//! - **repository**: data access
//! - **service**: user use cases

pub mod cli;
pub mod commands;
pub mod config;
pub mod helpers;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::AppResult;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserManager;

/// Connect, apply pending migrations and build the user service.
pub async fn connect_service(config: &UserServiceConfig) -> AppResult<UserManager> {
    let db = Database::connect(&config.database).await?;
    Ok(UserManager::new(Arc::new(UserStore::new(db.get_connection()))))
}

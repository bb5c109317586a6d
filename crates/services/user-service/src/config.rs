//! User service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};
use domain::DEFAULT_AVATAR_SIZE;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Logging settings
    pub service: ServiceConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Edge length of rendered avatars, in pixels
    pub avatar_size: u32,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database_url = env::var("USER_SERVICE_DATABASE_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| DatabaseConfig::default().url);

        Self {
            service: ServiceConfig::from_env("user-service"),
            database: DatabaseConfig::from_env(database_url),
            avatar_size: env::var("USER_SERVICE_AVATAR_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_AVATAR_SIZE),
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            avatar_size: DEFAULT_AVATAR_SIZE,
        }
    }
}

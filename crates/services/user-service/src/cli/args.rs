//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// User service - registration, sign-in and profiles
#[derive(Parser, Debug)]
#[command(name = "user-service")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage user accounts
    Users(UsersArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the users command
#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// User account actions
#[derive(Subcommand, Debug)]
pub enum UsersAction {
    /// Register a new user
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, env = "USER_PASSWORD_CONFIRMATION", hide_env_values = true)]
        password_confirmation: String,
    },
    /// Change name, email or password of a user
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, requires = "password_confirmation")]
        password: Option<String>,
        #[arg(long)]
        password_confirmation: Option<String>,
    },
    /// Check an email/password pair
    Authenticate {
        #[arg(long)]
        email: String,
        #[arg(long, env = "USER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show a user profile with its avatar
    Show {
        id: Uuid,
        /// Avatar size in pixels (defaults to USER_SERVICE_AVATAR_SIZE)
        #[arg(long)]
        size: Option<u32>,
    },
    /// List all users
    List,
}

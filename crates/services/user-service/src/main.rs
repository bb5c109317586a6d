//! User Service - command-line entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::{
    cli::{Cli, Commands},
    commands,
    config::UserServiceConfig,
};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = UserServiceConfig::from_env();

    init_tracing(cli.verbose, &config.service.log_level);
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Migrate(args) => commands::migrate::execute(args, &config).await,
        Commands::Users(args) => commands::users::execute(args, &config).await,
    };

    if let Err(e) = result {
        match e.field_errors() {
            Some(errors) => {
                for err in errors.iter() {
                    tracing::warn!(field = %err.field, "{}", err.reason);
                }
            }
            None if e.is_client_error() => tracing::warn!("{}", e.user_message()),
            None => tracing::error!(code = e.code(), "Command failed: {}", e.user_message()),
        }
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber (verbose mode sets debug level)
fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

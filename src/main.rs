//! PolicyRAG - Enterprise policy assistant demo CLI
//!
//! Main entry point for the PolicyRAG application.

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use policyrag::cli::{Cli, Commands};
use policyrag::commands;
use policyrag::config::Config;
use policyrag::storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    let storage: Arc<dyn Storage> = Arc::new(config.open_storage()?);

    match cli.command {
        Commands::Login { email, password } => {
            tracing::info!("Starting demo sign-in");
            commands::auth::login(storage, &email, &password)
        }
        Commands::Logout => commands::auth::logout(storage),
        Commands::Whoami => commands::auth::whoami(storage),
        Commands::Chat { resume, scope } => {
            tracing::info!("Starting interactive chat");
            if let Some(r) = &resume {
                tracing::debug!("Resuming session: {}", r);
            }
            if let Some(s) = &scope {
                tracing::debug!("Limiting questions to scope: {}", s);
            }
            commands::chat::run_chat(&config, storage, resume, scope).await
        }
        Commands::History { command } => {
            tracing::debug!("Starting history command");
            commands::history::handle_history(storage, command)
        }
        Commands::Policies { command } => commands::policies::handle_policies(command),
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "policyrag=debug"
    } else {
        "policyrag=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! Weathervane - weather assistant CLI
//!
//! Main entry point for the Weathervane application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use weathervane::cli::{Cli, Commands};
use weathervane::commands;
use weathervane::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load and validate configuration; missing credentials fail here,
    // before any session starts
    let mut config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Chat { model } => {
            config.apply_model_override(model);
            config.validate()?;
            commands::chat::run_chat(config).await?;
        }
        Commands::Ask { query, model } => {
            config.apply_model_override(model);
            config.validate()?;
            commands::ask::run_ask(config, &query).await?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "weathervane=debug"
    } else {
        "weathervane=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

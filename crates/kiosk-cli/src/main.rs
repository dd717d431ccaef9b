//! Kiosk CLI entrypoint.

use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod handlers;
mod logging;

use commands::{Commands, ConfigCommands};
use config::KioskConfig;

#[derive(Parser)]
#[command(name = "kiosk")]
#[command(author, version, about = "Kiosk asset selection command-line interface", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "KIOSK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = KioskConfig::load(cli.config.as_deref())?;
    logging::init_logging(config.log_format);
    tracing::debug!(
        immich_url = %config.immich.url,
        cache_ttl_secs = ?config.cache_ttl_secs,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Next {
            person,
            device,
            count,
        } => handlers::next(&config, person, device, count).await?,
        Commands::PersonStats { person } => handlers::person_stats(&config, &person).await?,
        Commands::Config { command } => match command {
            ConfigCommands::Show => handlers::show_config(&config)?,
        },
    }

    Ok(())
}

//! Cabinshare CLI - Command-line interface for cabin booking checks
//!
//! Provides commands for:
//! - Checking a date range against a cabin's approved bookings
//! - Suggesting nearby open dates
//! - Listing free days of a month
//! - Importing a reservation snapshot into the local cache
//! - Viewing and validating configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use cabinshare_core::config::Config;
use commands::{
    available::AvailableCommand, check::CheckCommand, completions::CompletionsCommand,
    config::ConfigCommand, import::ImportCommand, suggest::SuggestCommand, AppContext,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "cabinshare",
    version,
    about = "Booking conflict checks for shared vacation cabins"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use alternate reservation cache database
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a date range for booking conflicts
    Check(CheckCommand),
    /// Suggest nearby conflict-free dates
    Suggest(SuggestCommand),
    /// List the free days of a month
    Available(AvailableCommand),
    /// Import reservations from a YAML file into the local cache
    Import(ImportCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path);
    if let Some(database) = cli.database.clone() {
        config.store.database = database;
    }

    // Setup tracing; logs go to stderr so --json output stays parseable
    let filter = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = AppContext {
        format: OutputFormat::from_json_flag(cli.json),
        config,
        config_path,
    };

    match cli.command {
        Commands::Check(cmd) => cmd.execute(&ctx).await,
        Commands::Suggest(cmd) => cmd.execute(&ctx).await,
        Commands::Available(cmd) => cmd.execute(&ctx).await,
        Commands::Import(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
        Commands::Completions(cmd) => cmd.execute(&ctx).await,
    }
}

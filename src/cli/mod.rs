//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod places;
pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Nearby toilets, parking and Wi-Fi
#[derive(Parser)]
#[command(name = "atlasgo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// List places near a coordinate
    Places(places::PlacesArgs),

    /// Search known places by name or address
    Search(search::SearchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Places(args) => places::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Initialize logging on stderr
///
/// `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

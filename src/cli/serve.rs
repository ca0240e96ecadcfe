//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::cli::init_logging;
use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Fallback places file
    #[arg(long)]
    pub fallback: Option<PathBuf>,

    /// Overpass interpreter URL
    #[arg(long)]
    pub overpass_url: Option<String>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    init_logging("info");

    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(path) = args.fallback {
        config.fallback.path = path;
    }
    if let Some(url) = args.overpass_url {
        config.overpass.url = url;
    }

    info!(
        "Starting atlasgo server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    server::run(config).await
}

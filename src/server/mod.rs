//! HTTP server for atlasgo
//!
//! Provides REST API endpoints for POI retrieval and search.

pub mod routes;
pub mod state;

use crate::cache::ResultCache;
use crate::config::Config;
use crate::error::{Error, Result};
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Server configuration
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let sweep_interval = config.cache.sweep_interval_secs;
    let state = Arc::new(AppState::new(config)?);

    if sweep_interval > 0 {
        spawn_sweeper(Arc::clone(state.cache()), Duration::from_secs(sweep_interval));
    }

    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}

/// Periodically drop expired cache entries
fn spawn_sweeper(cache: Arc<ResultCache>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // first tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = cache.purge_expired();
            if removed > 0 {
                debug!("Swept {} expired cache entries", removed);
            }
        }
    })
}

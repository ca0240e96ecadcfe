//! Server shared state
//!
//! Holds configuration and the pipeline components shared by every request.
//! The cache and fallback set are built once here and handed to both the
//! aggregator and the search index.

use crate::cache::ResultCache;
use crate::config::Config;
use crate::error::Result;
use crate::fallback::FallbackStore;
use crate::overpass::{OverpassSource, PoiSource, QueryBuilder};
use crate::places::{PlaceAggregator, SearchIndex};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState<S = OverpassSource> {
    /// Configuration
    pub config: Config,

    /// Retrieval pipeline
    pub aggregator: PlaceAggregator<S>,

    /// Free-text search
    pub search: SearchIndex,

    /// Wall-clock start time
    pub started_at: DateTime<Utc>,

    started: Instant,
}

impl AppState<OverpassSource> {
    /// Create application state talking to the configured Overpass endpoint
    pub fn new(config: Config) -> Result<Self> {
        let source = OverpassSource::with_user_agent(
            config.overpass.url.clone(),
            config.overpass.timeout(),
            &config.overpass.user_agent,
        )?;
        let fallback = FallbackStore::load(&config.fallback.path);
        Ok(Self::with_source(config, source, fallback))
    }
}

impl<S: PoiSource> AppState<S> {
    /// Create application state around an explicit source and fallback set
    pub fn with_source(config: Config, source: S, fallback: FallbackStore) -> Self {
        let cache = Arc::new(ResultCache::with_settings(
            config.cache.capacity,
            config.cache.ttl(),
        ));
        let fallback = Arc::new(fallback);
        let queries = QueryBuilder::new(config.overpass.query_timeout_secs);

        Self {
            search: SearchIndex::new(Arc::clone(&cache), Arc::clone(&fallback)),
            aggregator: PlaceAggregator::new(source, queries, cache, fallback),
            config,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// Shared result cache
    pub fn cache(&self) -> &Arc<ResultCache> {
        self.aggregator.cache()
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

//! Retrieval pipeline
//!
//! Per request:
//! 1. cache hit → return it, flagged `cached`
//! 2. build the Overpass query; no queryable category → skip the source
//! 3. fetch and normalize; keep only requested categories
//! 4. nothing usable (failure, empty payload, nothing left after filtering)
//!    → fallback set
//! 5. sort nearest first, store, return
//!
//! Concurrent misses on the same key are not coalesced: each one queries the
//! source and writes the cache, and the last write wins.

use crate::cache::{fingerprint, ResultCache};
use crate::error::Result;
use crate::fallback::FallbackStore;
use crate::overpass::normalize::normalize;
use crate::overpass::{PoiSource, QueryBuilder};
use crate::places::{PlacesRequest, PlacesResponse};
use crate::poi::{sort_by_distance, Poi};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates cache, live source and fallback
#[derive(Debug)]
pub struct PlaceAggregator<S> {
    source: S,
    queries: QueryBuilder,
    cache: Arc<ResultCache>,
    fallback: Arc<FallbackStore>,
}

impl<S: PoiSource> PlaceAggregator<S> {
    pub fn new(
        source: S,
        queries: QueryBuilder,
        cache: Arc<ResultCache>,
        fallback: Arc<FallbackStore>,
    ) -> Self {
        Self {
            source,
            queries,
            cache,
            fallback,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    pub fn fallback(&self) -> &Arc<FallbackStore> {
        &self.fallback
    }

    /// Places near `request.center`, nearest first
    ///
    /// Only invalid input is an error; source trouble is absorbed by the fallback.
    pub async fn retrieve(&self, request: &PlacesRequest) -> Result<PlacesResponse> {
        request.validate()?;

        let key = fingerprint(request.center, request.radius_m, &request.categories);
        if let Some(entry) = self.cache.get(&key) {
            debug!("Cache hit for {}", key);
            return Ok(PlacesResponse {
                places: entry.places.as_ref().clone(),
                total: entry.total,
                cached: true,
            });
        }
        debug!("Cache miss for {}", key);

        let mut places = self.fetch_live(request).await;
        if places.is_empty() {
            info!("Using fallback places for {}", key);
            places = self
                .fallback
                .query(request.center, request.radius_m, &request.categories);
        }

        sort_by_distance(&mut places);
        let entry = self.cache.insert(key, places.clone());

        Ok(PlacesResponse {
            places,
            total: entry.total,
            cached: false,
        })
    }

    /// Usable live records, or nothing
    async fn fetch_live(&self, request: &PlacesRequest) -> Vec<Poi> {
        let Some(query) = self
            .queries
            .build(request.center, request.radius_m, &request.categories)
        else {
            debug!("No queryable category in '{}', skipping {}", request.categories, self.source.name());
            return Vec::new();
        };

        match self.source.fetch(&query).await {
            Ok(raw) => {
                let places: Vec<Poi> = normalize(&raw, request.center)
                    .into_iter()
                    .filter(|p| request.categories.contains(p.category))
                    .collect();
                info!(
                    "Got {} places from {} ({} raw elements)",
                    places.len(),
                    self.source.name(),
                    raw.elements.len()
                );
                places
            }
            Err(e) => {
                warn!("{} unavailable: {}", self.source.name(), e);
                Vec::new()
            }
        }
    }
}

//! atlasgo: nearby toilets, parking and Wi-Fi
//!
//! Finds points of interest around a coordinate using the public Overpass
//! API, with a short-lived result cache and a local fallback dataset for
//! when the live source is down or has nothing to say.
//!
//! ## Quick Start
//!
//! ```rust
//! use atlasgo::coord::Coordinates;
//! use atlasgo::fallback::FallbackStore;
//! use atlasgo::poi::CategorySet;
//!
//! let store = FallbackStore::builtin();
//! let center = Coordinates::new(48.8566, 2.3522); // Paris
//! let nearby = store.query(center, 500.0, &CategorySet::parse("toilet,wifi"));
//! assert!(!nearby.is_empty());
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod fallback;
pub mod format;
pub mod overpass;
pub mod places;
pub mod poi;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use places::{PlaceAggregator, PlacesRequest, PlacesResponse};
pub use poi::{Category, CategorySet, Poi};

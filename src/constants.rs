//! Centralized constants for the atlasgo crate
//!
//! Values shared by more than one module live here so the pipeline and the
//! adapters agree on them.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (spherical approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Meters per degree used to size the query bounding box.
    ///
    /// Applied to latitude and longitude alike, so the box widens less than it
    /// should away from the equator.
    pub const METERS_PER_DEGREE: f64 = 111_000.0;
}

/// External API endpoints
pub mod api {
    /// Public Overpass interpreter
    pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

    /// Prefix applied to Overpass element ids so they never collide with fallback ids
    pub const OVERPASS_ID_PREFIX: &str = "overpass_";
}

/// Cache settings
pub mod cache {
    /// Lifetime of a cached result set in seconds
    pub const RESULT_TTL_SECS: u64 = 300;

    /// Maximum number of cached result sets
    pub const RESULT_CAPACITY: usize = 1000;

    /// Decimal places kept from the center coordinate when building a cache key (~11 m)
    pub const KEY_COORD_PRECISION: usize = 4;
}

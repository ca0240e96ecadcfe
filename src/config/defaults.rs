//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::{api, cache};

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default Overpass interpreter URL
pub const DEFAULT_OVERPASS_URL: &str = api::OVERPASS_URL;

/// Client-side bound on one Overpass call, in seconds
pub const DEFAULT_OVERPASS_TIMEOUT_SECS: u64 = 30;

/// `[timeout:N]` directive embedded in Overpass queries
pub const DEFAULT_QUERY_TIMEOUT_SECS: u32 = 25;

/// User agent sent to Overpass
pub const DEFAULT_USER_AGENT: &str = concat!("atlasgo/", env!("CARGO_PKG_VERSION"));

/// Result cache lifetime in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = cache::RESULT_TTL_SECS;

/// Result cache capacity
pub const DEFAULT_CACHE_CAPACITY: usize = cache::RESULT_CAPACITY;

/// Interval between expired-entry sweeps, in seconds
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Fallback dataset path (relative to the working directory)
pub const DEFAULT_FALLBACK_PATH: &str = "mock_data.json";

/// Default search radius in meters
pub const DEFAULT_RADIUS_M: f64 = crate::places::DEFAULT_RADIUS_M;

/// Default category list
pub const DEFAULT_CATEGORIES: &str = crate::places::DEFAULT_CATEGORIES;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "atlasgo";

//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/atlasgo/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Request defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Overpass client settings
    #[serde(default)]
    pub overpass: OverpassConfig,

    /// Result cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Fallback dataset settings
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Default values for retrieval requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default search radius in meters
    #[serde(default = "default_radius")]
    pub radius_m: f64,

    /// Default comma-separated categories
    #[serde(default = "default_categories")]
    pub categories: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Overpass client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Interpreter endpoint
    #[serde(default = "default_overpass_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_overpass_timeout")]
    pub timeout_secs: u64,

    /// Server-side query timeout in seconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u32,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Result cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// Maximum number of entries
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Seconds between expired-entry sweeps (0 disables the sweep)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

/// Fallback dataset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// JSON file with fallback places
    #[serde(default = "default_fallback_path")]
    pub path: PathBuf,
}

// Default value functions for serde
fn default_radius() -> f64 {
    DEFAULT_RADIUS_M
}
fn default_categories() -> String {
    DEFAULT_CATEGORIES.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_overpass_url() -> String {
    DEFAULT_OVERPASS_URL.to_string()
}
fn default_overpass_timeout() -> u64 {
    DEFAULT_OVERPASS_TIMEOUT_SECS
}
fn default_query_timeout() -> u32 {
    DEFAULT_QUERY_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}
fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}
fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}
fn default_fallback_path() -> PathBuf {
    PathBuf::from(DEFAULT_FALLBACK_PATH)
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius(),
            categories: default_categories(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: default_overpass_url(),
            timeout_secs: default_overpass_timeout(),
            query_timeout_secs: default_query_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            path: default_fallback_path(),
        }
    }
}

impl OverpassConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "radius_m"] => Some(self.defaults.radius_m.to_string()),
            ["defaults", "categories"] => Some(self.defaults.categories.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["overpass", "url"] => Some(self.overpass.url.clone()),
            ["overpass", "timeout_secs"] => Some(self.overpass.timeout_secs.to_string()),
            ["overpass", "query_timeout_secs"] => {
                Some(self.overpass.query_timeout_secs.to_string())
            }
            ["overpass", "user_agent"] => Some(self.overpass.user_agent.clone()),

            ["cache", "ttl_secs"] => Some(self.cache.ttl_secs.to_string()),
            ["cache", "capacity"] => Some(self.cache.capacity.to_string()),
            ["cache", "sweep_interval_secs"] => Some(self.cache.sweep_interval_secs.to_string()),

            ["fallback", "path"] => Some(self.fallback.path.display().to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "radius_m"] => {
                self.defaults.radius_m = parse_value(value, "radius")?;
            }
            ["defaults", "categories"] => {
                self.defaults.categories = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = parse_value(value, "port")?;
            }

            ["overpass", "url"] => {
                self.overpass.url = value.to_string();
            }
            ["overpass", "timeout_secs"] => {
                self.overpass.timeout_secs = parse_value(value, "timeout")?;
            }
            ["overpass", "query_timeout_secs"] => {
                self.overpass.query_timeout_secs = parse_value(value, "timeout")?;
            }
            ["overpass", "user_agent"] => {
                self.overpass.user_agent = value.to_string();
            }

            ["cache", "ttl_secs"] => {
                self.cache.ttl_secs = parse_value(value, "ttl")?;
            }
            ["cache", "capacity"] => {
                self.cache.capacity = parse_value(value, "capacity")?;
            }
            ["cache", "sweep_interval_secs"] => {
                self.cache.sweep_interval_secs = parse_value(value, "interval")?;
            }

            ["fallback", "path"] => {
                self.fallback.path = PathBuf::from(value);
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.radius_m",
            "defaults.categories",
            "server.host",
            "server.port",
            "overpass.url",
            "overpass.timeout_secs",
            "overpass.query_timeout_secs",
            "overpass.user_agent",
            "cache.ttl_secs",
            "cache.capacity",
            "cache.sweep_interval_secs",
            "fallback.path",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

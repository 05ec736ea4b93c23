//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub cache_size: usize,
    /// Eviction policy tag (`LRU`, `FIFO` or `LFU`)
    pub cache_policy: String,
    /// Entry TTL in seconds, 0 disables expiration
    pub cache_ttl: u64,
    /// Full URL of the scoring endpoint
    pub score_service_url: String,
    /// Base URL of the storage service
    pub storage_service_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout for scoring calls in seconds
    pub score_timeout: u64,
    /// Timeout for hit notifications in seconds
    pub storage_timeout: u64,
    /// Readiness probe attempts at startup
    pub startup_probe_retries: u32,
    /// Delay between readiness probe attempts in seconds
    pub startup_probe_delay: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_POLICY` - Eviction policy (default: LRU)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 0, disabled)
    /// - `SCORE_SERVICE_URL` - Scoring endpoint (default: http://localhost:8002/score)
    /// - `STORAGE_SERVICE_URL` - Storage base URL (default: http://localhost:8003)
    /// - `SERVER_PORT` - HTTP server port (default: 8001)
    /// - `SCORE_TIMEOUT_SECS` - Scoring call timeout (default: 15)
    /// - `STORAGE_TIMEOUT_SECS` - Hit notification timeout (default: 2)
    /// - `STARTUP_PROBE_RETRIES` - Readiness probe attempts (default: 10)
    /// - `STARTUP_PROBE_DELAY_SECS` - Delay between attempts (default: 5)
    ///
    /// # Errors
    /// A variable that is set but cannot be parsed yields
    /// `CacheError::Configuration`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            cache_size: parse_var("CACHE_SIZE", defaults.cache_size)?,
            cache_policy: env::var("CACHE_POLICY").unwrap_or(defaults.cache_policy),
            cache_ttl: parse_var("CACHE_TTL", defaults.cache_ttl)?,
            score_service_url: env::var("SCORE_SERVICE_URL")
                .unwrap_or(defaults.score_service_url),
            storage_service_url: env::var("STORAGE_SERVICE_URL")
                .unwrap_or(defaults.storage_service_url),
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
            score_timeout: parse_var("SCORE_TIMEOUT_SECS", defaults.score_timeout)?,
            storage_timeout: parse_var("STORAGE_TIMEOUT_SECS", defaults.storage_timeout)?,
            startup_probe_retries: parse_var(
                "STARTUP_PROBE_RETRIES",
                defaults.startup_probe_retries,
            )?,
            startup_probe_delay: parse_var(
                "STARTUP_PROBE_DELAY_SECS",
                defaults.startup_probe_delay,
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size: 1000,
            cache_policy: "LRU".to_string(),
            cache_ttl: 0,
            score_service_url: "http://localhost:8002/score".to_string(),
            storage_service_url: "http://localhost:8003".to_string(),
            server_port: 8001,
            score_timeout: 15,
            storage_timeout: 2,
            startup_probe_retries: 10,
            startup_probe_delay: 5,
        }
    }
}

/// Reads `name`, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            CacheError::configuration(format!("{} has an invalid value '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

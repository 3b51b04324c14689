use std::{env, time::Duration};

use clap::ValueEnum;

/// Which data source backs the application, selected once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceMode {
    /// Fixture data with simulated latency.
    #[default]
    Mock,
    /// The remote advisor API.
    Remote,
}

/// Application configuration loaded from environment variables.
///
/// Freshness and eviction windows are tuning, not invariants; every value
/// here has a default and can be overridden per process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Freshness window in seconds (default: 300).
    pub fresh_seconds: u64,
    /// Idle garbage-collection window in seconds (default: 600).
    pub gc_seconds: u64,
    /// Maximum number of cache entries (default: 1,000).
    pub cache_max_entries: usize,
    /// Transient-failure retry count (default: 2).
    pub max_retries: u32,
    /// Remote request timeout in seconds (default: 30).
    pub request_timeout_seconds: u64,
    /// Simulated mock-source latency in milliseconds (default: 500).
    pub mock_latency_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BRIEFDESK_FRESH_SECONDS` - freshness window (default: 300)
    /// - `BRIEFDESK_GC_SECONDS` - idle eviction window (default: 600)
    /// - `BRIEFDESK_CACHE_MAX_ENTRIES` - cache capacity (default: 1,000)
    /// - `BRIEFDESK_MAX_RETRIES` - transient retries (default: 2)
    /// - `BRIEFDESK_REQUEST_TIMEOUT_SECONDS` - remote timeout (default: 30)
    /// - `BRIEFDESK_MOCK_LATENCY_MS` - mock latency (default: 500)
    pub fn from_env() -> Self {
        Self {
            fresh_seconds: parse_env("BRIEFDESK_FRESH_SECONDS", 300),
            gc_seconds: parse_env("BRIEFDESK_GC_SECONDS", 600),
            cache_max_entries: parse_env("BRIEFDESK_CACHE_MAX_ENTRIES", 1_000),
            max_retries: parse_env("BRIEFDESK_MAX_RETRIES", 2),
            request_timeout_seconds: parse_env("BRIEFDESK_REQUEST_TIMEOUT_SECONDS", 30),
            mock_latency_ms: parse_env("BRIEFDESK_MOCK_LATENCY_MS", 500),
        }
    }

    /// Get the freshness window as a Duration.
    pub fn fresh_window(&self) -> Duration {
        Duration::from_secs(self.fresh_seconds)
    }

    /// Get the idle eviction window as a Duration.
    pub fn gc_window(&self) -> Duration {
        Duration::from_secs(self.gc_seconds)
    }

    /// Get the remote request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get the simulated mock latency as a Duration.
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_conversions() {
        let config = Config {
            fresh_seconds: 600,
            gc_seconds: 1_200,
            cache_max_entries: 1_000,
            max_retries: 2,
            request_timeout_seconds: 15,
            mock_latency_ms: 250,
        };

        assert_eq!(config.fresh_window(), Duration::from_secs(600));
        assert_eq!(config.gc_window(), Duration::from_secs(1_200));
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.mock_latency(), Duration::from_millis(250));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("BRIEFDESK_FRESH_SECONDS");
        env::remove_var("BRIEFDESK_GC_SECONDS");
        env::remove_var("BRIEFDESK_CACHE_MAX_ENTRIES");
        env::remove_var("BRIEFDESK_MAX_RETRIES");
        env::remove_var("BRIEFDESK_REQUEST_TIMEOUT_SECONDS");
        env::remove_var("BRIEFDESK_MOCK_LATENCY_MS");

        let config = Config::from_env();

        assert_eq!(config.fresh_seconds, 300);
        assert_eq!(config.gc_seconds, 600);
        assert_eq!(config.cache_max_entries, 1_000);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.mock_latency_ms, 500);
    }
}

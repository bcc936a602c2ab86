//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Admin HTTP server port
    pub server_port: u16,
    /// How long a snapshot stays fresh, in milliseconds (0 = reload on every access)
    pub refresh_interval_ms: u64,
    /// JSON document backing the reference tables
    pub reference_data_path: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `REFRESH_INTERVAL_MS` - Snapshot refresh interval (default: 60000)
    /// - `REFERENCE_DATA_PATH` - Reference data document (default: reference_data.json)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            refresh_interval_ms: env::var("REFRESH_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_interval_ms),
            reference_data_path: env::var("REFERENCE_DATA_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.reference_data_path),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            refresh_interval_ms: 60_000,
            reference_data_path: PathBuf::from("reference_data.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.refresh_interval_ms, 60_000);
        assert_eq!(config.reference_data_path, PathBuf::from("reference_data.json"));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("REFRESH_INTERVAL_MS");
        env::remove_var("REFERENCE_DATA_PATH");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.refresh_interval_ms, 60_000);
        assert_eq!(config.reference_data_path, PathBuf::from("reference_data.json"));
    }
}

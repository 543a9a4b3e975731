//! Runtime configuration.
//!
//! Read from a `key = value` file (default `/etc/rawsniff.conf`, or the
//! path in `RAWSNIFF_CONFIG`), then overridden by environment variables.
//! Command-line flags override both.

use std::env;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::ConfigError;

const DEFAULT_CONFIG_PATH: &str = "/etc/rawsniff.conf";
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capture on this interface only; `None` captures on all of them.
    pub interface: Option<String>,
    /// Upper bound on a single blocking read, so stop requests are seen.
    pub poll_interval: Duration,
    /// tracing-subscriber filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interface: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            env::var("RAWSNIFF_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::parse_str(&content)?
        } else {
            Self::default()
        };

        // Allow environment variable overrides
        if let Ok(val) = env::var("RAWSNIFF_INTERFACE") {
            config.set("interface", &val)?;
        }
        if let Ok(val) = env::var("RAWSNIFF_POLL_INTERVAL_MS") {
            config.set("poll_interval_ms", &val)?;
        }
        if let Ok(val) = env::var("RAWSNIFF_LOG") {
            config.set("log_filter", &val)?;
        }

        Ok(config)
    }

    /// Parse config file contents on top of the defaults.
    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config.set(key.trim(), value.trim())?;
            }
        }
        Ok(config)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "interface" => {
                self.interface = (!value.is_empty()).then(|| value.to_string());
            }
            "poll_interval_ms" => {
                let millis = value
                    .parse::<u64>()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| ConfigError::Invalid {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
                self.poll_interval = Duration::from_millis(millis);
            }
            "log_filter" => self.log_filter = value.to_string(),
            _ => debug!("Ignoring unknown config key {}", key),
        }
        Ok(())
    }
}

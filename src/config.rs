//! Server configuration.
//!
//! Loaded from an optional TOML file, with environment variables taking
//! precedence over file values. Everything has a default, so the server
//! starts with no configuration at all.

use std::env;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "lineup.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bind host for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
    /// Directory containing the scraper's JSON output.
    pub player_data_dir: String,
    /// Base URL of the upstream scraper service.
    pub scraper_base_url: String,
    /// Timeout for upstream scraper requests, in seconds.
    pub scraper_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            player_data_dir: "../scraper/output".to_string(),
            scraper_base_url: "http://localhost:5001".to_string(),
            scraper_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the TOML file at `LINEUP_CONFIG`
    /// (or `lineup.toml`) when present, then environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = env::var("LINEUP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut config = if Path::new(&path).exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path))?;
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse config file {}", path))?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(host) = env::var("HOST") {
            self.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            self.port = port;
        }
        if let Ok(dir) = env::var("PLAYER_DATA_DIR") {
            self.player_data_dir = dir;
        }
        if let Ok(url) = env::var("SCRAPER_BASE_URL") {
            self.scraper_base_url = url;
        }
        if let Some(secs) = env::var("SCRAPER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.scraper_timeout_secs = secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.scraper_timeout_secs, 30);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let config: Config = toml::from_str("port = 9000").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.scraper_base_url, "http://localhost:5001");
    }
}

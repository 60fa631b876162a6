use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/command";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

const ENDPOINT_ENV: &str = "ROBOT_PANEL_ENDPOINT";
const TIMEOUT_ENV: &str = "ROBOT_PANEL_TIMEOUT_MS";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Panel configuration. Environment variables win over file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_timeout_ms: default_timeout_ms(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path).context("reading config file")?;
        let cfg: Config = serde_json::from_str(&raw).context("parsing JSON")?;
        Ok(cfg.with_env_overrides())
    }

    /// No path means built-in defaults, still honoring the
    /// environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default().with_env_overrides()),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }
        if let Some(timeout_ms) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.default_timeout_ms = timeout_ms;
        }
        self
    }
}

use serde::{Deserialize, Serialize};

use crate::app::catalog::{Channel, Os};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Initial option selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Channel selected at startup (default: release).
    #[serde(default)]
    pub channel: Channel,
    /// Operating system selected at startup (default: windows).
    #[serde(default)]
    pub os: Os,
}

/// Settings for the "request new numbers" action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Artificial latency of the simulated source in milliseconds (default: 1000).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Request timeout for the HTTP source in seconds (default: 10).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Remote endpoint. When unset the simulated source is used.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            timeout_seconds: default_timeout_seconds(),
            endpoint: None,
        }
    }
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_seconds() -> u64 {
    10
}

//! Configuration types for btc-ticker

use crate::price::{SpotPriceConfig, DEFAULT_SPOT_URL, DEFAULT_USER_AGENT};
use crate::telemetry::LogFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Polls are never scheduled more often than this
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 10;

/// Upper bound so the timer deadline never overflows
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ticker: TickerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Price polling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TickerConfig {
    /// Spot price endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Seconds between polls (floored at 10)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Per-request deadline in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_endpoint() -> String {
    DEFAULT_SPOT_URL.to_string()
}
fn default_refresh_interval() -> u64 {
    60
}
fn default_timeout() -> u64 {
    15
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            refresh_interval_secs: default_refresh_interval(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl TickerConfig {
    /// Poll interval actually used by the scheduler
    pub fn effective_interval(&self) -> Duration {
        effective_interval(self.refresh_interval_secs)
    }

    /// HTTP client settings derived from this section
    pub fn spot_config(&self) -> SpotPriceConfig {
        SpotPriceConfig {
            url: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Clamp a configured interval into the supported range
pub fn effective_interval(interval_secs: u64) -> Duration {
    Duration::from_secs(interval_secs.clamp(MIN_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS))
}

/// Status bar entry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub alignment: Alignment,

    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Colour token, e.g. "yellow" or "#f7931a"
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub format: OutputFormat,

    /// Pad the text to this many columns (0 = no padding)
    #[serde(default)]
    pub width: usize,
}

fn default_priority() -> i32 {
    100
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            alignment: Alignment::default(),
            priority: default_priority(),
            color: None,
            format: OutputFormat::default(),
            width: 0,
        }
    }
}

/// Which side of the bar the entry sits on
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Right,
}

/// Status line encoding
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, optionally coloured
    #[default]
    Text,
    /// One JSON object per line (waybar)
    Json,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

//! # Configuration Management Module
//!
//! Optional TOML configuration for meshpeers. Every value has a default, so
//! the tool runs without a config file; a file only needs the keys it changes.
//!
//! ## Configuration Structure
//!
//! - [`MeshtasticConfig`] - how to reach the device and run the CLI
//! - [`ReportConfig`] - default report mode and timestamp display
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use meshpeers::config::Config;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("meshpeers.toml").await?;
//!     println!("CLI: {}", config.meshtastic.cli_path);
//!
//!     Config::create_default("meshpeers.example.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [meshtastic]
//! cli_path = "meshtastic"
//! port = "/dev/ttyUSB0"
//! timeout_secs = 30
//!
//! [report]
//! mode = "direct"
//! utc_timestamps = false
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! Precedence: CLI args > config file > defaults.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::meshtastic::DEFAULT_SECTION_MARKER;
use crate::peers::{Mode, TimestampZone};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "meshpeers.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub meshtastic: MeshtasticConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshtasticConfig {
    /// Meshtastic CLI executable, looked up on `PATH` when not absolute.
    pub cli_path: String,
    /// Serial device path. Mutually exclusive with `host`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// IP address or hostname of a network node. Mutually exclusive with `port`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Seconds to wait for the CLI before killing it. Must be > 0.
    pub timeout_secs: u64,
    /// Text that precedes the node table in `--info` output.
    pub section_marker: String,
}

impl Default for MeshtasticConfig {
    fn default() -> Self {
        Self {
            cli_path: "meshtastic".to_string(),
            port: None,
            host: None,
            timeout_secs: 30,
            section_marker: DEFAULT_SECTION_MARKER.to_string(),
        }
    }
}

impl MeshtasticConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub mode: Mode,
    /// Show `Last Heard` in UTC instead of local time.
    pub utc_timestamps: bool,
}

impl ReportConfig {
    pub fn zone(&self) -> TimestampZone {
        if self.utc_timestamps {
            TimestampZone::Utc
        } else {
            TimestampZone::Local
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed `level`; unknown names fall back to `warn`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        Self::parse(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))
    }

    /// Load `path` when given, otherwise [`DEFAULT_CONFIG_PATH`] if it exists,
    /// otherwise defaults. An explicitly named file must be readable.
    pub async fn load_or_default(path: Option<&str>) -> Result<Self> {
        if let Some(explicit) = path {
            return Self::load(explicit).await;
        }
        if fs::try_exists(DEFAULT_CONFIG_PATH).await.unwrap_or(false) {
            Self::load(DEFAULT_CONFIG_PATH).await
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.meshtastic.timeout_secs == 0 {
            return Err(anyhow!("meshtastic.timeout_secs must be greater than 0"));
        }
        if self.meshtastic.cli_path.trim().is_empty() {
            return Err(anyhow!("meshtastic.cli_path must not be empty"));
        }
        if self.meshtastic.section_marker.is_empty() {
            return Err(anyhow!("meshtastic.section_marker must not be empty"));
        }
        if self.meshtastic.port.is_some() && self.meshtastic.host.is_some() {
            return Err(anyhow!("set either meshtastic.port or meshtastic.host, not both"));
        }
        Ok(())
    }

    /// Create a default configuration file
    pub async fn create_default(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut config = Config::default();
        config.meshtastic.port = Some("/dev/ttyUSB0".to_string());
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }
}

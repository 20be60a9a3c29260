//! Bridge configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Bridge settings
    #[serde(default)]
    pub bridge: BridgeConfig,
    /// Message bus settings
    #[serde(default)]
    pub bus: BusConfig,
    /// Audio server settings
    #[serde(default)]
    pub pulse: PulseConfig,
}

/// Bridge-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Topic prefix for shared-broker installations (empty for none)
    #[serde(default)]
    pub topic_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { log_level: default_log_level(), topic_prefix: String::new() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Message bus settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    /// Broker address
    #[serde(default = "default_broker")]
    pub broker: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self { broker: default_broker() }
    }
}

fn default_broker() -> String {
    "tcp://localhost:1883".to_string()
}

/// Audio server settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PulseConfig {
    /// Server socket path (optional, uses the session default if not set)
    pub socket: Option<PathBuf>,
}

/// Load configuration from file or defaults.
pub fn load_config() -> Result<Config> {
    let config_path = config_path()?;

    if config_path.exists() {
        load_config_from(&config_path)
    } else {
        info!(?config_path, "Config file not found, using defaults");
        Ok(Config::default())
    }
}

/// Load configuration from a specific file.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {path:?}"))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {path:?}"))?;
    Ok(config)
}

/// Get the configuration file path.
fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "pulsebridge", "Pulsebridge")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

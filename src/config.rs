use crate::error::{ProvupError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_EVENT_SOURCE: &str = "ProvisioningUpdates";
const DEFAULT_EVENT_LOG: &str = "Application";

/// Runtime configuration, read from an optional TOML file.
///
/// Every section falls back to its defaults, so an empty file is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub events: EventConfig,
    pub update: UpdateConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        let path = if cfg!(target_os = "windows") {
            PathBuf::from(r"C:\ProgramData\Provisioning\Logs\WindowsUpdates.log")
        } else {
            PathBuf::from("/var/log/provup/updates.log")
        };
        Self { path }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub source: String,
    pub log: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_EVENT_SOURCE.to_string(),
            log: DEFAULT_EVENT_LOG.to_string(),
        }
    }
}

/// What to do when an installation reports that a restart is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebootPolicy {
    /// Forced restart as the last action of the run
    #[default]
    Immediate,
    /// Log that a restart is pending and leave the machine running
    Suppress,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    pub reboot: RebootPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub url: Option<String>,
    pub args: Vec<String>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            url: None,
            args: vec!["/s".to_string(), "/norestart".to_string()],
        }
    }
}

impl Config {
    /// Load the configuration file if one was given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            ProvupError::Config(format!("Failed to read '{}': {e}", path.display()))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

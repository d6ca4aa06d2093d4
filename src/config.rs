// src/config.rs

//! portup configuration file
//!
//! ```toml
//! ports_dir = "/opt/ports"
//! port_command = "port"
//! default_frontend = "pypi"
//! ```
//!
//! Every key is optional. Without `--config`, the file is looked up at
//! `<config dir>/portup/config.toml` and defaults are used when it does not
//! exist.

use crate::error::{Error, Result};
use crate::frontend::Frontend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-user configuration file
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the ports tree holding `<category>/<port>/Portfile`
    #[serde(default = "default_ports_dir")]
    pub ports_dir: PathBuf,

    /// MacPorts command used to query published versions
    #[serde(default = "default_port_command")]
    pub port_command: String,

    /// Frontend used when neither the CLI nor the diff file names one
    #[serde(default)]
    pub default_frontend: Option<String>,
}

fn default_ports_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_port_command() -> String {
    "port".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ports_dir: default_ports_dir(),
            port_command: default_port_command(),
            default_frontend: None,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&content)
    }

    /// Load the explicit file if given, else the per-user file if present
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.port_command.trim().is_empty() {
            return Err(Error::ConfigError("port_command cannot be empty".to_string()));
        }
        if let Some(frontend) = &self.default_frontend {
            frontend
                .parse::<Frontend>()
                .map_err(|e| Error::ConfigError(format!("default_frontend: {}", e)))?;
        }
        Ok(())
    }

    /// The configured default frontend, if any
    pub fn default_frontend(&self) -> Option<Frontend> {
        self.default_frontend.as_deref().and_then(|f| f.parse().ok())
    }
}

/// `<config dir>/portup/config.toml`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("portup").join(CONFIG_FILE_NAME))
}

//! Configuration system for the stepview client
//!
//! Settings live in `~/.stepview.toml`, which is created with defaults on
//! first run. Command-line flags override whatever the file says.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use stepview_client::dispatcher::DEFAULT_PROGRAM;
use tracing::{debug, info};

use crate::ui::Theme;

/// Backend the original service listens on
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5001";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Program started when none is selected
    pub default_program: String,
    /// Active color theme
    pub theme: Theme,
    /// Debugger backend settings
    pub server: ServerConfig,
    /// Programs offered by the picker
    pub programs: Vec<ProgramEntry>,
}

/// Debugger backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the backend
    pub url: String,
    /// Per-request timeout in seconds; requests wait indefinitely when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// A debuggable program known to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramEntry {
    /// Name sent to the start endpoint
    pub name: String,
    /// One-line description shown in the picker
    #[serde(default)]
    pub description: String,
}

impl ProgramEntry {
    /// Create a catalog entry
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_program: DEFAULT_PROGRAM.to_string(),
            theme: Theme::default(),
            server: ServerConfig::default(),
            programs: vec![
                ProgramEntry::new("byteshow", "Shows the byte order of an int"),
                ProgramEntry::new("heap_test", "Allocates and frees heap blocks"),
            ],
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { url: DEFAULT_SERVER_URL.to_string(), request_timeout_secs: None }
    }
}

impl Config {
    /// Get the config file path (~/.stepview.toml)
    pub fn config_path() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| eyre::eyre!("Unable to determine home directory"))?;
        Ok(home.join(".stepview.toml"))
    }

    /// Load configuration from the default path, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!("Config file not found, creating default at {:?}", config_path);
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from_path(config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file as TOML: {path:?}"))?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to_path(Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config to TOML")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {path:?}"))?;

        debug!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.server.request_timeout_secs.map(Duration::from_secs)
    }

    /// Program catalog, with the default program first if it is not listed
    pub fn catalog(&self) -> Vec<ProgramEntry> {
        let mut programs = self.programs.clone();
        if !programs.iter().any(|p| p.name == self.default_program) {
            programs.insert(0, ProgramEntry::new(self.default_program.clone(), ""));
        }
        programs
    }
}

//! File-based config discovery for CLI use.
//!
//! Handles finding and loading `baler.toml` from the project root. Library
//! users should construct `BalerConfig::from_value()` directly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BalerConfig;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "baler.toml";

/// File-based configuration discovery.
///
/// # Example
///
/// ```no_run
/// use baler_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find the config file in the root directory.
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Load config from the discovered file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<BalerConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        load_path(&path)
    }
}

/// Load config from an explicit file path (`--config`).
pub fn load_path(path: &Path) -> Result<BalerConfig> {
    tracing::debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(path)?;

    let toml_val: toml::Value =
        toml::from_str(&content).map_err(|e| ConfigError::InvalidToml(e.to_string()))?;

    let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
        field: "config".to_string(),
        message: e.to_string(),
    })?;

    BalerConfig::from_value(value)
}

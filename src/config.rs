//! Configuration system for grove-tools.
//!
//! Provides layered configuration from multiple sources:
//!
//! 1. **Compiled defaults** - the paths the tools have always used
//! 2. **User config file** - `~/.config/grove-tools/config.toml`
//! 3. **Environment variables** - `GROVE_STORE_DIR`, `GROVE_HTML`, and
//!    `NO_COLOR` (any value turns colours off)
//! 4. **CLI arguments** - Highest priority, always wins
//!
//! # Example Configuration File
//!
//! ```toml
//! [paths]
//! store_dir = "local-store/sqlite"
//! db_file = "sqlite.db"
//! html = "frontend/index.html"
//!
//! [output]
//! colors = true
//! ```

use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default store directory, relative to the working directory.
pub const DEFAULT_STORE_DIR: &str = "local-store/sqlite";

/// Default database file name inside the store directory.
pub const DEFAULT_DB_FILE: &str = "sqlite.db";

/// Default HTML file repaired by `fix-encoding`.
pub const DEFAULT_HTML_PATH: &str = "frontend/index.html";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

/// Path configuration for the store and the HTML target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the database file.
    /// Environment variable: `GROVE_STORE_DIR`
    pub store_dir: PathBuf,

    /// Database file name inside `store_dir`.
    pub db_file: String,

    /// HTML file to repair.
    /// Environment variable: `GROVE_HTML`
    pub html: PathBuf,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored output.
    pub colors: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            db_file: DEFAULT_DB_FILE.to_string(),
            html: PathBuf::from(DEFAULT_HTML_PATH),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { colors: true }
    }
}

impl Config {
    /// Load configuration from defaults, the user config file, and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the user config file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self> {
        let mut config = match Self::user_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();

        debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Load configuration from a specific file.
    ///
    /// Keys missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ToolError::path_error("read config", path, e))?;
        let config =
            toml::from_str(&content).map_err(|e| ToolError::config(path, e.to_string()))?;
        info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Get the path to the user configuration file.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("grove-tools").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup.
    fn apply_overrides(&mut self, mut lookup: impl FnMut(&str) -> Option<String>) {
        if let Some(store_dir) = lookup("GROVE_STORE_DIR") {
            self.paths.store_dir = PathBuf::from(store_dir);
        }
        if let Some(html) = lookup("GROVE_HTML") {
            self.paths.html = PathBuf::from(html);
        }
        if lookup("NO_COLOR").is_some() {
            self.output.colors = false;
        }
    }
}

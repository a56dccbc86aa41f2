//! CLI settings file.
//!
//! Reads the optional `.envcrypt.toml` from the working directory:
//!
//! ```toml
//! [load]
//! file = "config/.env.production"
//! ignore_missing = false
//! ignore_malformed = true
//! ```
//!
//! Command-line flags take precedence over anything set here.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants::{ENV_FILE, SETTINGS_FILE};
use crate::core::loader::Loader;
use crate::error::{ConfigError, Result};

/// Contents of `.envcrypt.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub load: LoadSettings,
}

/// `[load]` section
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LoadSettings {
    /// Configuration file to load
    pub file: Option<PathBuf>,
    pub ignore_missing: bool,
    pub ignore_malformed: bool,
}

/// Overrides taken from the command line.
#[derive(Debug, Default, Clone)]
pub struct LoadOverrides {
    pub file: Option<PathBuf>,
    pub private_key: Option<String>,
    pub ignore_missing: bool,
    pub ignore_malformed: bool,
}

impl Settings {
    /// Path to the settings file in the current directory
    pub fn settings_path() -> PathBuf {
        PathBuf::from(SETTINGS_FILE)
    }

    /// Load settings from the current directory, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// exists but cannot be read.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path())
    }

    /// Load settings from an explicit path, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// exists but cannot be read.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading settings");
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let settings: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        Ok(settings)
    }

    /// Configuration file to load, flag first.
    pub fn file(&self, overrides: &LoadOverrides) -> PathBuf {
        overrides
            .file
            .clone()
            .or_else(|| self.load.file.clone())
            .unwrap_or_else(|| PathBuf::from(ENV_FILE))
    }

    /// Build a loader from these settings and the command-line overrides.
    pub fn loader(&self, overrides: &LoadOverrides) -> Loader {
        let mut loader = Loader::path(self.file(overrides));

        if overrides.ignore_missing || self.load.ignore_missing {
            loader = loader.ignore_if_missing();
        }
        if overrides.ignore_malformed || self.load.ignore_malformed {
            loader = loader.ignore_if_malformed();
        }
        if let Some(key) = overrides.private_key.as_deref().filter(|k| !k.is_empty()) {
            loader = loader.private_key(key);
        }

        loader
    }
}

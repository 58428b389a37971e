//! Path management for Wheelboard
//!
//! ## Path Resolution Order
//!
//! 1. `WHEELBOARD_HOME` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/wheelboard` or `~/.config/wheelboard`
//! 3. Windows: `%APPDATA%\wheelboard`

use std::path::PathBuf;

use crate::error::WheelboardError;

/// Environment variable overriding the base directory
pub const HOME_ENV: &str = "WHEELBOARD_HOME";

/// Manages all paths used by Wheelboard
#[derive(Debug, Clone)]
pub struct WheelboardPaths {
    /// Base directory for Wheelboard configuration
    base_dir: PathBuf,
}

impl WheelboardPaths {
    /// Create a new WheelboardPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, WheelboardError> {
        let base_dir = match std::env::var(HOME_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create WheelboardPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/wheelboard/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), WheelboardError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| WheelboardError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, WheelboardError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                WheelboardError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("wheelboard"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, WheelboardError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| WheelboardError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("wheelboard"))
}

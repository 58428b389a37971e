//! User settings for Wheelboard
//!
//! Default input and output locations for builds, the environment variable
//! that carries the password, and the log level.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::WheelboardPaths;
use crate::error::WheelboardError;

/// User settings for Wheelboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Portfolio data file
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Page template; the bundled template is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_file: Option<PathBuf>,

    /// Built page
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Environment variable read for the password before prompting
    #[serde(default = "default_password_env")]
    pub password_env: String,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_data_file() -> PathBuf {
    PathBuf::from("portfolio.json")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("index.html")
}

fn default_password_env() -> String {
    "WHEELBOARD_PASSWORD".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            data_file: default_data_file(),
            template_file: None,
            output_file: default_output_file(),
            password_env: default_password_env(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &WheelboardPaths) -> Result<Self, WheelboardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, WheelboardError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WheelboardError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            WheelboardError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &WheelboardPaths) -> Result<(), WheelboardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            WheelboardError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| WheelboardError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

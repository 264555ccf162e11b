// SPDX-License-Identifier: MPL-2.0
//! Report settings stored in a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[report]` - Output destination and Size column rendering
//! - `[scan]` - How directory inputs are walked
//! - `[decode]` - Time zone for filesystem timestamps
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `EXIF_REPORT_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use exif_report::config;
//!
//! let (mut config, _warning) = config::load();
//! config.scan.recursive = true;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::metadata::{DecodeOptions, TimestampZone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ExifReport";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "EXIF_REPORT_CONFIG_DIR";

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// CSV destination; standard output when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    #[serde(default = "default_human_readable_size")]
    pub human_readable_size: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: None,
            human_readable_size: DEFAULT_HUMAN_READABLE_SIZE,
        }
    }
}

/// Directory walk settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    #[serde(default = "default_recursive")]
    pub recursive: bool,

    #[serde(default = "default_follow_symlinks")]
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: DEFAULT_RECURSIVE,
            follow_symlinks: DEFAULT_FOLLOW_SYMLINKS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DecodeConfig {
    #[serde(default)]
    pub timestamp_zone: TimestampZone,
}

impl From<DecodeConfig> for DecodeOptions {
    fn from(config: DecodeConfig) -> Self {
        DecodeOptions {
            timestamp_zone: config.timestamp_zone,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub decode: DecodeConfig,
}

fn default_human_readable_size() -> bool {
    DEFAULT_HUMAN_READABLE_SIZE
}

fn default_recursive() -> bool {
    DEFAULT_RECURSIVE
}

fn default_follow_symlinks() -> bool {
    DEFAULT_FOLLOW_SYMLINKS
}

/// Returns the config directory.
///
/// # Resolution Order
///
/// 1. `override_path` parameter (if `Some`)
/// 2. `EXIF_REPORT_CONFIG_DIR` environment variable (if set and non-empty)
/// 3. Platform-specific config directory (with app name appended)
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// Returns defaults when no file exists. When the file exists but cannot be
/// parsed, defaults are returned together with a warning message.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(e) => {
                    return (
                        Config::default(),
                        Some(format!(
                            "ignoring unreadable config '{}': {e}",
                            path.display()
                        )),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default location.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(|e| Error::io(path, e))?;
    Ok(())
}

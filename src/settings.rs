//! Game settings
//!
//! Process-wide configuration is read once at startup from a RON file and
//! handed to the scenes as an immutable value. Every field has a default, so a
//! settings file only needs to name what it overrides.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "canopy.ron";

/// Environment variable that overrides the settings path
pub const SETTINGS_ENV: &str = "CANOPY_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of all game assets
    pub asset_root: PathBuf,
    /// Image directory, relative to `asset_root`
    pub img_dir: PathBuf,
    /// Level directory, relative to `asset_root`
    pub levels_dir: PathBuf,
    /// Level files in play order. Play wraps around after the last one.
    pub levels: Vec<String>,
    /// Outline collision geometry and the goal region
    pub debug_draw: bool,
    /// Framebuffer resolution
    pub screen_width: usize,
    pub screen_height: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            img_dir: PathBuf::from("img"),
            levels_dir: PathBuf::from("levels"),
            levels: vec![
                "level0.ron".to_string(),
                "level1.ron".to_string(),
                "level5.ron".to_string(),
            ],
            debug_draw: false,
            screen_width: 960,
            screen_height: 540,
        }
    }
}

impl Settings {
    pub fn img_folder(&self) -> PathBuf {
        self.asset_root.join(&self.img_dir)
    }

    pub fn levels_folder(&self) -> PathBuf {
        self.asset_root.join(&self.levels_dir)
    }

    pub fn level_path(&self, name: &str) -> PathBuf {
        self.levels_folder().join(name)
    }

    /// Parse settings from a RON string
    pub fn from_ron_str(contents: &str, path: &Path) -> Result<Self, SettingsError> {
        ron::from_str(contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&contents, path)
    }

    /// Load settings from `path`, falling back to defaults when the file does
    /// not exist. A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            warn!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings = Self::load(path)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Resolve the settings path from the environment and load it
    pub fn from_env() -> Result<Self, SettingsError> {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        Self::load_or_default(&path)
    }
}

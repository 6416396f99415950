use crate::error::{ChooserError, Result};
use crate::io::ListingOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub font: FontConfig,
    pub ui: UiConfig,
}

/// Theme configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ThemeConfig {
    /// "dark" or "light"
    pub mode: String,
}

/// Font and text rendering configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct FontConfig {
    /// Size of the main interface font (in points)
    pub font_size: f32,
}

/// Listing behavior configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UiConfig {
    /// Show hidden files by default
    pub show_hidden: bool,
    /// Show directories before files
    pub dirs_first: bool,
    /// Directory to open when none is given on the command line
    pub start_path: Option<PathBuf>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: "dark".to_string(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            dirs_first: true,
            start_path: None,
        }
    }
}

impl Config {
    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("", "", "filechooser")
    }

    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Where the selection is kept between runs
    pub fn session_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("session.toml"))
    }

    /// Load configuration from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(contents) => match Self::from_toml(&contents) {
                        Ok(config) => return config,
                        Err(e) => {
                            warn!("Failed to parse config file: {}. Using defaults", e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file: {}. Using defaults", e);
                    }
                }
            }
        }
        Config::default()
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(ChooserError::NoConfigDir)?;
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ChooserError::io(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents).map_err(|e| ChooserError::io(&path, e))
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default() -> Result<()> {
        if let Some(path) = Self::config_path() {
            if !path.exists() {
                Config::default().save()?;
            }
        }
        Ok(())
    }

    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            show_hidden: self.ui.show_hidden,
            dirs_first: self.ui.dirs_first,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.theme.mode != "light"
    }
}

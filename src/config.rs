use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::{self, ParsedKeyBinding, parse_key_binding};

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Field file holding the serialized tags, empty means the profile default
    #[serde(default)]
    pub field_path: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_commit")]
    pub commit: String,
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_toggle_focus")]
    pub toggle_focus: String,
    #[serde(default = "default_chip_left")]
    pub chip_left: String,
    #[serde(default = "default_chip_right")]
    pub chip_right: String,
    #[serde(default = "default_remove_chip")]
    pub remove_chip: String,
    #[serde(default = "default_paste")]
    pub paste: String,
}

/// Key bindings after parsing, ready to match key events
#[derive(Debug, Clone, Copy)]
pub struct ParsedKeyBindings {
    pub commit: ParsedKeyBinding,
    pub quit: ParsedKeyBinding,
    pub toggle_focus: ParsedKeyBinding,
    pub chip_left: ParsedKeyBinding,
    pub chip_right: ParsedKeyBinding,
    pub remove_chip: ParsedKeyBinding,
    pub paste: ParsedKeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_chip_bg")]
    pub chip_bg: String,
    /// Empty means "pick a color that contrasts with chip_bg"
    #[serde(default)]
    pub chip_fg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default)]
    pub highlight_fg: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_path: default_field_path(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            commit: default_commit(),
            quit: default_quit(),
            toggle_focus: default_toggle_focus(),
            chip_left: default_chip_left(),
            chip_right: default_chip_right(),
            remove_chip: default_remove_chip(),
            paste: default_paste(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            chip_bg: default_chip_bg(),
            chip_fg: String::new(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: String::new(),
        }
    }
}

impl KeyBindings {
    pub fn parse(&self) -> Result<ParsedKeyBindings, ConfigError> {
        let parse = |name: &str, value: &str| {
            parse_key_binding(value)
                .map_err(|e| ConfigError::InvalidKeyBinding(format!("{}: {}", name, e)))
        };
        Ok(ParsedKeyBindings {
            commit: parse("commit", &self.commit)?,
            quit: parse("quit", &self.quit)?,
            toggle_focus: parse("toggle_focus", &self.toggle_focus)?,
            chip_left: parse("chip_left", &self.chip_left)?,
            chip_right: parse("chip_right", &self.chip_right)?,
            remove_chip: parse("remove_chip", &self.remove_chip)?,
            paste: parse("paste", &self.paste)?,
        })
    }
}

impl Theme {
    /// Get preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("default".to_string(), Theme::default());

        themes.insert("light".to_string(), Theme {
            fg: "black".to_string(),
            bg: "white".to_string(),
            chip_bg: "lightblue".to_string(),
            chip_fg: String::new(),
            highlight_bg: "blue".to_string(),
            highlight_fg: "white".to_string(),
        });

        themes.insert("green".to_string(), Theme {
            fg: "green".to_string(),
            bg: "black".to_string(),
            chip_bg: "green".to_string(),
            chip_fg: "black".to_string(),
            highlight_bg: "yellow".to_string(),
            highlight_fg: "black".to_string(),
        });

        themes.insert("monochrome".to_string(), Theme {
            fg: "white".to_string(),
            bg: "black".to_string(),
            chip_bg: "gray".to_string(),
            chip_fg: "black".to_string(),
            highlight_bg: "white".to_string(),
            highlight_fg: "black".to_string(),
        });

        themes
    }
}

// Default value functions
fn default_field_path() -> String {
    // Fallback only, the profile is applied at load time
    Config::default_field_path_for_profile(utils::Profile::Prod)
}

fn default_commit() -> String {
    "Enter".to_string()
}

fn default_quit() -> String {
    "Esc".to_string()
}

fn default_toggle_focus() -> String {
    "Tab".to_string()
}

fn default_chip_left() -> String {
    "Left".to_string()
}

fn default_chip_right() -> String {
    "Right".to_string()
}

fn default_remove_chip() -> String {
    "Delete".to_string()
}

fn default_paste() -> String {
    "Ctrl+v".to_string()
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "reset".to_string()
}

fn default_chip_bg() -> String {
    "blue".to_string()
}

fn default_highlight_bg() -> String {
    "yellow".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Invalid key binding {0}")]
    InvalidKeyBinding(String),
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),
}

impl Config {
    /// Load configuration from the profile's config file, or create default if missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        Self::load_from_path(&config_path, profile)
    }

    /// Load configuration from an explicit file, writing defaults if it does not exist
    pub fn load_from_path(path: &Path, profile: utils::Profile) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
            let mut config: Config = toml::from_str(&contents)?;
            if config.field_path.trim().is_empty() {
                config.field_path = Self::default_field_path_for_profile(profile);
            }
            config.key_bindings.parse()?;
            tracing::info!(path = %path.display(), "config loaded");
            Ok(config)
        } else {
            let mut config = Config::default();
            config.field_path = Self::default_field_path_for_profile(profile);
            config.save_to_path(path)?;
            tracing::info!(path = %path.display(), "default config written");
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save_to_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    /// Default field file location for a profile
    fn default_field_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("tags.txt").to_string_lossy().to_string()
        } else {
            match profile {
                utils::Profile::Dev => "~/.local/share/multitag-dev/tags.txt".to_string(),
                utils::Profile::Prod => "~/.local/share/multitag/tags.txt".to_string(),
            }
        }
    }

    /// Get the expanded field file path (with ~ expansion)
    pub fn get_field_path(&self) -> PathBuf {
        utils::expand_path(&self.field_path)
    }

    /// Get the currently active theme, falling back to the default preset
    pub fn get_active_theme(&self) -> Theme {
        self.themes
            .get(&self.current_theme)
            .cloned()
            .or_else(|| Theme::get_preset_themes().remove(&self.current_theme))
            .unwrap_or_default()
    }

    /// Set the active theme by name
    pub fn set_theme(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.themes.contains_key(name) && !Theme::get_preset_themes().contains_key(name) {
            return Err(ConfigError::ThemeNotFound(name.to_string()));
        }
        self.current_theme = name.to_string();
        Ok(())
    }
}

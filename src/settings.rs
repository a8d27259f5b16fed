//! Game settings and preferences
//!
//! Application settings are read from an optional JSON file and may be
//! overridden from the command line. Display preferences are copied into
//! each save when it is created and travel with it afterwards.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::SAVE_FILE_NAME;

/// Text reveal speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextSpeed {
    /// Print whole lines at once
    Instant,
    Fast,
    #[default]
    Normal,
    Slow,
}

impl TextSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSpeed::Instant => "instant",
            TextSpeed::Fast => "fast",
            TextSpeed::Normal => "normal",
            TextSpeed::Slow => "slow",
        }
    }

    /// Delay between revealed characters
    pub fn char_delay(&self) -> Duration {
        match self {
            TextSpeed::Instant => Duration::ZERO,
            TextSpeed::Fast => Duration::from_millis(8),
            TextSpeed::Normal => Duration::from_millis(20),
            TextSpeed::Slow => Duration::from_millis(45),
        }
    }
}

impl FromStr for TextSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instant" | "off" => Ok(TextSpeed::Instant),
            "fast" => Ok(TextSpeed::Fast),
            "normal" | "med" => Ok(TextSpeed::Normal),
            "slow" => Ok(TextSpeed::Slow),
            other => Err(format!(
                "unknown text speed \"{other}\" (expected instant, fast, normal or slow)"
            )),
        }
    }
}

/// Cosmetic per-save settings, fixed once attached to a save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisplayPreferences {
    /// Typewriter speed for location descriptions
    pub text_speed: TextSpeed,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the save collection lives
    pub save_file: PathBuf,
    /// Story document to play instead of the bundled adventure
    pub story_file: Option<PathBuf>,
    /// Text speed given to newly created saves
    pub text_speed: TextSpeed,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_file: PathBuf::from(SAVE_FILE_NAME),
            story_file: None,
            text_speed: TextSpeed::default(),
        }
    }
}

impl Settings {
    /// Preferences handed to new saves
    pub fn display_preferences(&self) -> DisplayPreferences {
        DisplayPreferences {
            text_speed: self.text_speed,
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

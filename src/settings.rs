//! Persisted input settings.
//!
//! Settings are plain JSON. Missing fields fall back to defaults, so an
//! empty object is a valid settings file.

use crate::constants::{PRIMARY_BUTTON, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME};
use crate::error::InputResult;
use crate::input::WheelScale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Wheel delta multipliers per delta unit
    pub wheel: WheelScale,
    /// Button index treated as the primary mouse button
    pub primary_button: u16,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            wheel: WheelScale::default(),
            primary_button: PRIMARY_BUTTON,
        }
    }
}

impl InputSettings {
    pub fn from_json(json: &str) -> InputResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> InputResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading input settings");
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, or use defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> InputResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> InputResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "Saved input settings");
        Ok(())
    }
}

/// `<config dir>/unipointer/settings.json`, when the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}

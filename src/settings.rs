//! Game settings and preferences
//!
//! Presentation and audio options. Loaded from JSON at startup and never
//! written back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects on/off
    pub sound_on: bool,
    /// Background beat on/off
    pub music_on: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Debug overlays ===
    /// Draw collision circles
    pub show_bounding: bool,
    /// Draw a dot at the ship's centre
    pub show_centre_dot: bool,

    // === Flow ===
    /// Start a new game once the "Game Over" message has faded
    pub auto_restart: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            music_on: true,
            sfx_volume: 1.0,
            music_volume: 0.05,

            show_bounding: false,
            show_centre_dot: false,

            auto_restart: true,
        }
    }
}

impl Settings {
    /// Parse from JSON; volumes are clamped into range
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Effective effects volume (0 when sound is off)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.sound_on { self.sfx_volume } else { 0.0 }
    }

    /// Effective music volume (0 when music is off)
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_on { self.music_volume } else { 0.0 }
    }
}

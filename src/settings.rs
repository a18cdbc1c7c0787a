//! Game settings and preferences
//!
//! Persisted as JSON in the working directory. Everything here is optional
//! tuning on top of the compile-time constants in [`crate::consts`]; a
//! missing or malformed file falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Runtime preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; leave unset for a different run each launch
    pub seed: Option<u64>,
    /// Integer window scale over the 1000x300 viewport
    pub window_scale: u32,
    /// Outline collision boxes
    pub show_hitboxes: bool,
    /// Sprite sheet location
    pub sprite_sheet: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            window_scale: 1,
            show_hitboxes: false,
            sprite_sheet: "assets/sprite.png".into(),
        }
    }
}

impl Settings {
    /// Settings file looked for in the working directory
    pub const FILE: &'static str = "dino-dash.json";

    /// Load from disk; preferences are not worth failing startup over, so
    /// any problem degrades to defaults.
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write the current preferences back out
    pub fn save(&self) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(Self::FILE, json)
    }
}

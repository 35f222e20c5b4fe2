//! Player preferences
//!
//! Persisted separately from the high score: LocalStorage on the web, an
//! optional JSON file natively.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::DEATH_MESSAGE_TIMEOUT_MS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw the drifting background particles
    pub ambient_particles: bool,
    /// Disable sprite bob/hover and the trance flash
    pub reduced_motion: bool,
    /// How long to wait for a death message before using the fallback
    pub death_message_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ambient_particles: true,
            reduced_motion: false,
            death_message_timeout_ms: DEATH_MESSAGE_TIMEOUT_MS,
        }
    }
}

impl Settings {
    pub fn death_message_timeout(&self) -> Duration {
        Duration::from_millis(self.death_message_timeout_ms)
    }

    /// Whether sprites should animate in place
    pub fn sprite_motion(&self) -> bool {
        !self.reduced_motion
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "void_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), crate::persistence::PersistenceError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.ambient_particles);
        assert!(settings.sprite_motion());
        assert_eq!(settings.death_message_timeout(), Duration::from_secs(8));
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings = serde_json::from_str(r#"{ "reduced_motion": true }"#).unwrap();
        assert!(settings.reduced_motion);
        assert!(!settings.sprite_motion());
        assert!(settings.ambient_particles);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip_and_missing_file() {
        let dir = std::env::temp_dir().join(format!("void-runner-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        assert_eq!(Settings::load_from(&path), Settings::default());

        let custom = Settings {
            ambient_particles: false,
            death_message_timeout_ms: 250,
            ..Default::default()
        };
        custom.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), custom);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

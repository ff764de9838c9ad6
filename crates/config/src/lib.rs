//! Persisted settings for CircleCam
//!
//! One JSON file under the OS config directory. Writes are synchronous and
//! happen at user-interaction rate, so every mutation is durable immediately.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unable to locate OS config directory")]
    NoConfigDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Corner radius values the mask accepts, in percent of the max radius.
/// 100 is a full circle, 0 is square corners.
pub const ALLOWED_RADII: [u8; 5] = [0, 5, 10, 25, 100];

pub const DEFAULT_WINDOW_WIDTH: f32 = 200.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 200.0;
pub const DEFAULT_WINDOW_RADIUS: u8 = 100;

/// Everything CircleCam persists across restarts.
///
/// Window position is stored as per-axis edge anchors (nearest edge plus
/// distance) rather than absolute coordinates, so a saved position survives
/// display reconfiguration. Edge index 0 is the near edge (left/top),
/// 1 the far edge (right/bottom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: f32,
    pub window_height: f32,
    pub window_radius: u8,
    pub camera_source: Option<String>,
    pub window_screen_id: Option<String>,
    pub window_x_distance_to_edge: f32,
    pub window_y_distance_to_edge: f32,
    pub window_x_edge_index: u8,
    pub window_y_edge_index: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            window_radius: DEFAULT_WINDOW_RADIUS,
            camera_source: None,
            window_screen_id: None,
            window_x_distance_to_edge: 0.0,
            window_y_distance_to_edge: 0.0,
            window_x_edge_index: 0,
            window_y_edge_index: 0,
        }
    }
}

impl Settings {
    /// Reset out-of-range fields to their defaults, leaving valid ones
    /// untouched. Returns true if anything was repaired.
    pub fn sanitize(&mut self) -> bool {
        let mut repaired = false;

        if !(self.window_width.is_finite() && self.window_width > 0.0) {
            log::warn!(
                "invalid persisted window_width {}, using default",
                self.window_width
            );
            self.window_width = DEFAULT_WINDOW_WIDTH;
            repaired = true;
        }
        if !(self.window_height.is_finite() && self.window_height > 0.0) {
            log::warn!(
                "invalid persisted window_height {}, using default",
                self.window_height
            );
            self.window_height = DEFAULT_WINDOW_HEIGHT;
            repaired = true;
        }
        if !ALLOWED_RADII.contains(&self.window_radius) {
            log::warn!(
                "invalid persisted window_radius {}, using default",
                self.window_radius
            );
            self.window_radius = DEFAULT_WINDOW_RADIUS;
            repaired = true;
        }
        if !(self.window_x_distance_to_edge.is_finite() && self.window_x_distance_to_edge >= 0.0) {
            self.window_x_distance_to_edge = 0.0;
            repaired = true;
        }
        if !(self.window_y_distance_to_edge.is_finite() && self.window_y_distance_to_edge >= 0.0) {
            self.window_y_distance_to_edge = 0.0;
            repaired = true;
        }
        if self.window_x_edge_index > 1 {
            self.window_x_edge_index = 0;
            repaired = true;
        }
        if self.window_y_edge_index > 1 {
            self.window_y_edge_index = 0;
            repaired = true;
        }

        repaired
    }
}

/// Owns the settings file: loads once at startup, saves on every mutation.
pub struct ConfigStore {
    settings: Settings,
    path: PathBuf,
}

impl ConfigStore {
    /// Load settings from the OS config directory, creating the file with
    /// defaults when it does not exist yet.
    pub fn load_or_create() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("circlecam");
        fs::create_dir_all(&config_dir)?;
        Self::open(config_dir.join("config.json"))
    }

    /// Load settings from an explicit path. A missing file is seeded with
    /// defaults; an unreadable or corrupt file falls back to defaults
    /// rather than aborting startup.
    pub fn open(path: PathBuf) -> ConfigResult<Self> {
        let mut settings = if path.exists() {
            match Self::read_settings(&path) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!(
                        "could not read settings from {}: {err}, using defaults",
                        path.display()
                    );
                    Settings::default()
                }
            }
        } else {
            Settings::default()
        };

        settings.sanitize();

        let store = Self { settings, path };
        store.save()?;
        Ok(store)
    }

    fn read_settings(path: &Path) -> ConfigResult<Settings> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mutate settings and write them through synchronously.
    pub fn update<F>(&mut self, mutate: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Settings),
    {
        mutate(&mut self.settings);
        self.settings.sanitize();
        self.save()
    }

    fn save(&self) -> ConfigResult<()> {
        let payload = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigStore, Settings, ALLOWED_RADII};

    fn temp_config_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("circlecam_test_{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn missing_keys_take_defaults() {
        let parsed: Settings = serde_json::from_str("{}").expect("empty object should parse");
        assert_eq!(parsed, Settings::default());
        assert_eq!(parsed.window_width, 200.0);
        assert_eq!(parsed.window_height, 200.0);
        assert_eq!(parsed.window_radius, 100);
        assert_eq!(parsed.camera_source, None);
    }

    #[test]
    fn present_keys_survive_partial_json() {
        let raw = r#"{
            "window_width": 480.0,
            "camera_source": "Elgato Facecam",
            "window_x_edge_index": 1
        }"#;
        let parsed: Settings = serde_json::from_str(raw).expect("partial json should parse");
        assert_eq!(parsed.window_width, 480.0);
        assert_eq!(parsed.window_height, 200.0);
        assert_eq!(parsed.camera_source.as_deref(), Some("Elgato Facecam"));
        assert_eq!(parsed.window_x_edge_index, 1);
        assert_eq!(parsed.window_y_edge_index, 0);
    }

    #[test]
    fn sanitize_resets_only_invalid_fields() {
        let mut settings = Settings {
            window_width: -30.0,
            window_height: 480.0,
            window_radius: 42,
            window_x_distance_to_edge: -5.0,
            window_y_distance_to_edge: 17.0,
            window_x_edge_index: 7,
            ..Settings::default()
        };
        assert!(settings.sanitize());

        assert_eq!(settings.window_width, 200.0);
        assert_eq!(settings.window_height, 480.0);
        assert_eq!(settings.window_radius, 100);
        assert_eq!(settings.window_x_distance_to_edge, 0.0);
        assert_eq!(settings.window_y_distance_to_edge, 17.0);
        assert_eq!(settings.window_x_edge_index, 0);
    }

    #[test]
    fn sanitize_accepts_valid_settings_unchanged() {
        for radius in ALLOWED_RADII {
            let mut settings = Settings {
                window_radius: radius,
                window_x_distance_to_edge: 100.0,
                ..Settings::default()
            };
            let before = settings.clone();
            assert!(!settings.sanitize());
            assert_eq!(settings, before);
        }
    }

    #[test]
    fn store_round_trips_through_disk() {
        let path = temp_config_path();
        {
            let mut store = ConfigStore::open(path.clone()).expect("create store");
            store
                .update(|s| {
                    s.window_width = 480.0;
                    s.window_height = 480.0;
                    s.camera_source = Some("Built-in Camera".to_owned());
                })
                .expect("save settings");
        }

        let reloaded = ConfigStore::open(path.clone()).expect("reload store");
        assert_eq!(reloaded.settings().window_width, 480.0);
        assert_eq!(
            reloaded.settings().camera_source.as_deref(),
            Some("Built-in Camera")
        );

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = temp_config_path();
        std::fs::write(&path, "not json {").expect("write corrupt file");

        let store = ConfigStore::open(path.clone()).expect("open over corrupt file");
        assert_eq!(*store.settings(), Settings::default());

        let _ = std::fs::remove_file(path);
    }
}

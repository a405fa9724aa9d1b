//! Application settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::build::WallStyle;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark]
    }

    /// Viewport clear color RGB
    pub fn background(&self) -> [u8; 3] {
        match self {
            Theme::Light => [0xe0, 0xe8, 0xf0],
            Theme::Dark => [0x1e, 0x1e, 0x23],
        }
    }

    /// Grid line color RGB
    pub fn grid_color(&self) -> [u8; 3] {
        match self {
            Theme::Light => [0x88, 0x88, 0x88],
            Theme::Dark => [0x55, 0x55, 0x60],
        }
    }
}

/// Grid display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size in world units
    pub size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size: 1.0,
            range: 32,
            opacity: 0.6,
        }
    }
}

/// Pointer and camera input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    /// Pointer travel in pixels after which a press counts as a drag
    pub drag_threshold: f32,
    /// Degrees of orbit per pixel
    pub orbit_speed: f32,
    /// World units of pan per pixel
    pub pan_speed: f32,
    /// Zoom factor per scroll point
    pub zoom_speed: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            drag_threshold: 2.0,
            orbit_speed: 0.5,
            pan_speed: 0.01,
            zoom_speed: 0.01,
        }
    }
}

/// Autosave settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveSettings {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 6,
        }
    }
}

impl AutosaveSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub walls: WallStyle,
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub autosave: AutosaveSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "floorplan", "floorplan")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed settings file {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("Failed to create config dir: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Failed to save settings: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = AppSettings::default();
        assert_eq!(s.grid.range, 32);
        assert_eq!(s.input.drag_threshold, 2.0);
        assert_eq!(s.autosave.interval(), Duration::from_secs(6));
        assert_eq!(s.walls.height, 2.0);
        assert_eq!(s.walls.color, [0xdb, 0xdb, 0xdb]);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: AppSettings = serde_json::from_str(r#"{"theme":"Light"}"#).unwrap();
        assert_eq!(s.theme, Theme::Light);
        assert_eq!(s.grid.range, 32);
        assert!(s.autosave.enabled);
    }

    #[test]
    fn test_zero_interval_clamped() {
        let a = AutosaveSettings {
            enabled: true,
            interval_secs: 0,
        };
        assert_eq!(a.interval(), Duration::from_secs(1));
    }
}

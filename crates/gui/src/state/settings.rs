//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::{CanvasConfig, Color};

/// Window creation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Title bar text
    pub title: String,
    /// Initial inner width in logical pixels
    pub width: f32,
    /// Initial inner height in logical pixels
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "C3D App Window - OpenGL Canvas".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Clip planes applied to the canvas at setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        let canvas = CanvasConfig::default();
        Self {
            z_near: canvas.z_near(),
            z_far: canvas.z_far(),
        }
    }
}

/// Colors of the demo triangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Outline color
    pub line_color: Color,
    /// Fill color, `None` draws the outline only
    pub fill_color: Option<Color>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            line_color: Color::white(),
            fill_color: Some(Color::red()),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub window: WindowSettings,
    pub canvas: CanvasSettings,
    pub scene: SceneSettings,
}

impl AppSettings {
    /// Location of `settings.json` in the platform config dir
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "c3d", "c3d")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::default_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings: {e}");
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("c3d-settings-{}-{name}", std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn test_defaults_match_demo() {
        let s = AppSettings::default();
        assert_eq!(s.window.width, 800.0);
        assert_eq!(s.window.height, 600.0);
        assert_eq!(s.canvas.z_near, 0.1);
        assert_eq!(s.canvas.z_far, 100.0);
        assert_eq!(s.scene.line_color, Color::white());
        assert_eq!(s.scene.fill_color, Some(Color::red()));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"canvas": {"z_far": 50.0}, "scene": {"fill_color": null}}"#;
        let s: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(s.canvas.z_near, 0.1);
        assert_eq!(s.canvas.z_far, 50.0);
        assert_eq!(s.scene.fill_color, None);
        assert_eq!(s.scene.line_color, Color::white());
        assert_eq!(s.window, WindowSettings::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_path("roundtrip");
        let mut s = AppSettings::default();
        s.window.title = "Custom".to_string();
        s.scene.fill_color = Some(Color::blue());

        s.save_to(&path).unwrap();
        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded, s);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_save_then_load_uses_config_dir() {
        let home = std::env::temp_dir().join(format!("c3d-config-{}", std::process::id()));
        std::env::set_var("XDG_CONFIG_HOME", &home);

        let path = AppSettings::default_path().unwrap();
        assert!(path.starts_with(&home));
        assert!(path.ends_with("settings.json"));

        let mut s = AppSettings::default();
        s.window.width = 1024.0;
        s.window.height = 768.0;
        s.save();

        assert!(path.exists());
        assert_eq!(AppSettings::load(), s);

        let _ = std::fs::remove_dir_all(&home);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let path = temp_path("missing");
        assert!(AppSettings::load_from(&path).is_err());
    }

    #[test]
    fn test_load_invalid_json_is_error() {
        let path = temp_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let err = AppSettings::load_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}

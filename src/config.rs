//! Application and engine configuration.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the keys
//! it wants to override:
//!
//! ```toml
//! [window]
//! title = "Cairn"
//!
//! [engine]
//! background = 0x202020
//!
//! [engine.controls]
//! max_distance = 50.0
//! ```

use std::{f32::consts::PI, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, gfx::Color};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cairn".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

/// Settings applied by [`SceneEngine::init`](crate::gfx::engine::SceneEngine::init).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub background: Color,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    /// Builds the orthographic camera during init.
    pub orthographic: bool,
    /// Attaches pointer listeners for picking during init.
    pub picking: bool,
    /// World-space distance within which a pointer ray hits a line.
    pub line_pick_threshold: f32,
    /// Length of each debug axis.
    pub axes_size: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0xcccccc),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            orthographic: true,
            picking: true,
            line_pick_threshold: 1.0,
            axes_size: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Vertical extent of the orthographic frustum in world units.
    pub frustum_size: f32,
    pub orthographic_position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 70.0,
            near: 0.1,
            far: 1000.0,
            frustum_size: 10.0,
            orthographic_position: [20.0, 20.0, 20.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub screen_space_panning: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            screen_space_panning: false,
            min_distance: 5.0,
            max_distance: 100.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI / 2.0,
            min_zoom: 0.0,
            max_zoom: f32::INFINITY,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.engine.background.to_hex(), 0xcccccc);
        assert!(config.engine.orthographic);
        assert_eq!(config.engine.controls.min_distance, 5.0);
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml(
            r#"
            [window]
            title = "Viewer"

            [engine]
            background = 0x102030
            picking = false

            [engine.controls]
            damping_factor = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Viewer");
        assert_eq!(config.window.height, 800);
        assert_eq!(config.engine.background.to_hex(), 0x102030);
        assert!(!config.engine.picking);
        assert_eq!(config.engine.controls.damping_factor, 0.1);
        assert_eq!(config.engine.controls.max_distance, 100.0);
        assert_eq!(config.engine.camera.fov, 70.0);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = AppConfig::from_toml("[engine\nbackground = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load("/nonexistent/cairn.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

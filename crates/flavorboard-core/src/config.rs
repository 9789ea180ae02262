//! Editor configuration.

use crate::camera::{MAX_ZOOM, MIN_ZOOM};
use crate::shapes::{HexColor, StickyNote};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for the editor. Missing fields in a config file fall back to
/// the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Color selected at startup.
    pub default_color: HexColor,
    /// Eraser radius selected at startup.
    pub eraser_radius: u32,
    /// Stroke hit tolerance in world units (not scaled by zoom).
    pub hit_tolerance: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub sticky_width: f64,
    pub sticky_height: f64,
    pub sticky_placeholder: String,
    /// Stroke line width in world units.
    pub stroke_width: f64,
    /// Font size for labels and notes, in world units.
    pub font_size: f64,
    pub eraser_preview_color: HexColor,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_color: HexColor::black(),
            eraser_radius: 20,
            hit_tolerance: 5.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            sticky_width: StickyNote::DEFAULT_WIDTH,
            sticky_height: StickyNote::DEFAULT_HEIGHT,
            sticky_placeholder: StickyNote::PLACEHOLDER.to_string(),
            stroke_width: 2.0,
            font_size: 16.0,
            eraser_preview_color: HexColor::parse("#ff0000").unwrap_or_default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"eraser_radius": 8, "max_zoom": 6.0}"#).unwrap();
        assert_eq!(config.eraser_radius, 8);
        assert!((config.max_zoom - 6.0).abs() < f64::EPSILON);
        assert!((config.hit_tolerance - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.sticky_placeholder, "Double click to edit");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"eraser_radius": "big"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = EditorConfig::load("/definitely/not/here/flavorboard.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r##"{"default_color": "#336699"}"##).unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.default_color.as_str(), "#336699");
    }
}

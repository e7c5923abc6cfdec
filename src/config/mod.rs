//! # Configuration
//!
//! Immutable settings consumed by the renderer and the uploader.
//!
//! ## Modules
//!
//! - [`display`]: Device connection and canvas geometry
//! - [`image`]: Text layout defaults (padding, spacing, font-size range)
//! - [`palette`]: Named colours, colour schemes and named font sizes
//!
//! ## Usage
//!
//! ```
//! use slotframe::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.display.width, 240);
//! assert_eq!(config.image.padding.bottom, 25);
//! ```
//!
//! A JSON file can override any subset of fields:
//!
//! ```json
//! { "display": { "base_url": "http://10.0.0.7" }, "image": { "line_spacing": 6 } }
//! ```

pub mod display;
pub mod image;
pub mod palette;

use std::path::Path;

use serde::Deserialize;

use crate::error::SlotframeError;

pub use display::DisplayConfig;
pub use image::{ImageConfig, Padding};
pub use palette::{ColorScheme, NAMED_COLORS, named_font_size};

/// Complete configuration, passed explicitly to every component.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub image: ImageConfig,
}

impl Config {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SlotframeError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SlotframeError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Parse a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, SlotframeError> {
        let config: Config = serde_json::from_str(raw)
            .map_err(|e| SlotframeError::Config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SlotframeError> {
        let image = &self.image;
        if image.min_font_size == 0 || image.min_font_size > image.max_font_size {
            return Err(SlotframeError::Config(format!(
                "font size range [{}, {}] is empty",
                image.min_font_size, image.max_font_size
            )));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(SlotframeError::Config("canvas size must be non-zero".to_string()));
        }
        if !(1..=100).contains(&self.display.jpeg_quality) {
            return Err(SlotframeError::Config(format!(
                "jpeg_quality {} must be between 1 and 100",
                self.display.jpeg_quality
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json(
            r#"{ "display": { "base_url": "http://10.0.0.7" },
                 "image": { "line_spacing": 4, "padding": { "bottom": 0 } } }"#,
        )
        .unwrap();

        assert_eq!(config.display.base_url, "http://10.0.0.7");
        assert_eq!(config.display.jpeg_quality, 70);
        assert_eq!(config.image.line_spacing, 4);
        assert_eq!(config.image.padding, Padding::default().with_bottom(0));
    }

    #[test]
    fn test_rejects_empty_font_range() {
        let err = Config::from_json(r#"{ "image": { "min_font_size": 50, "max_font_size": 20 } }"#)
            .unwrap_err();
        assert!(matches!(err, SlotframeError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Config::from_json("{ display: "),
            Err(SlotframeError::Config(_))
        ));
    }
}

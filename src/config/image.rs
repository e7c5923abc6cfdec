//! Text layout defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Space kept free on each side of the canvas.
///
/// The bottom default leaves room for the device's own status line.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 0,
            bottom: 25,
            left: 0,
            right: 0,
        }
    }
}

impl Padding {
    /// Same padding on all four sides
    pub const fn uniform(value: u32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    pub fn with_top(mut self, top: u32) -> Self {
        self.top = top;
        self
    }

    pub fn with_bottom(mut self, bottom: u32) -> Self {
        self.bottom = bottom;
        self
    }

    pub fn with_left(mut self, left: u32) -> Self {
        self.left = left;
        self
    }

    pub fn with_right(mut self, right: u32) -> Self {
        self.right = right;
        self
    }
}

/// Layout defaults for generated images.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    /// Size used when neither `auto` nor an explicit size is requested
    pub default_font_size: u32,

    /// Vertical gap between lines, before stroke compensation
    pub line_spacing: u32,

    pub padding: Padding,

    /// Smallest size the auto-fit search may choose
    pub min_font_size: u32,

    /// Largest size the auto-fit search may choose
    pub max_font_size: u32,

    /// Regular TrueType face; bold/italic variants are looked up beside it
    pub font_path: Option<PathBuf>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            default_font_size: 24,
            line_spacing: 10,
            padding: Padding::default(),
            min_font_size: 10,
            max_font_size: 200,
            font_path: None,
        }
    }
}

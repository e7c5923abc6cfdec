//! # Error Types
//!
//! This module defines error types used throughout the slotframe library.

use thiserror::Error;

/// Main error type for slotframe operations
#[derive(Debug, Error)]
pub enum SlotframeError {
    /// Colour spec that is neither a known name, hex, nor `r,g,b`
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Fixed font size does not fit the layout box
    #[error("Text does not fit at font size {size}{}", largest_hint(.largest_fitting))]
    TextTooLarge {
        size: u32,
        largest_fitting: Option<u32>,
    },

    /// Fixed font size outside the configured range
    #[error("Font size {0} is outside the allowed range")]
    InvalidFontSize(u32),

    /// Outline wider than the renderer supports
    #[error("Stroke width {0} is too large (maximum {max})", max = crate::render::MAX_STROKE_WIDTH)]
    InvalidStrokeWidth(u32),

    /// Layout box could not be built (padding consumes the canvas)
    #[error("Layout error: {0}")]
    Layout(String),

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// Image decoding/encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Slot number outside the device's range
    #[error("Invalid slot {0}: must be between 1 and 5")]
    InvalidSlot(u8),

    /// Transport-level errors (connection, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The device answered, but rejected the upload
    #[error("Upload rejected with status {status}: {message}")]
    Upload { status: u16, message: String },

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn largest_hint(largest: &Option<u32>) -> String {
    match largest {
        Some(size) => format!(" (largest size that fits: {})", size),
        None => " (no size in range fits)".to_string(),
    }
}

//! TrueType faces rendered with ab_glyph.
//!
//! Glyphs are rasterised straight onto the RGB canvas with anti-aliased
//! coverage blending, so several passes (stroke offsets, then fill) compose
//! naturally.

use std::path::Path;

use ab_glyph::{Font, FontArc, ScaleFont};
use image::RgbImage;

use super::{ITALIC_SHEAR, blend};
use crate::error::SlotframeError;
use crate::render::color::Color;

/// Load a TrueType/OpenType file.
pub fn load(path: &Path) -> Result<FontArc, SlotframeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| SlotframeError::Font(format!("Failed to read {}: {}", path.display(), e)))?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| SlotframeError::Font(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Advance width of `text` at `pixel_height`, including kerning.
pub fn text_width(font: &FontArc, text: &str, pixel_height: f32) -> f32 {
    let scaled = font.as_scaled(pixel_height);
    let mut width = 0.0f32;
    let mut previous = None;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        previous = Some(glyph_id);
    }
    width
}

/// Line height from font metrics (ascent to descent).
pub fn line_height(font: &FontArc, pixel_height: f32) -> f32 {
    let scaled = font.as_scaled(pixel_height);
    scaled.ascent() - scaled.descent()
}

pub fn ascent(font: &FontArc, pixel_height: f32) -> f32 {
    font.as_scaled(pixel_height).ascent()
}

/// Draw `text` with its line box's top-left corner at (`x`, `top`).
pub fn draw(
    canvas: &mut RgbImage,
    font: &FontArc,
    text: &str,
    pixel_height: f32,
    x: f32,
    top: f32,
    color: Color,
    synthetic_italic: bool,
) {
    let scaled = font.as_scaled(pixel_height);
    let baseline_y = top + scaled.ascent();
    let mut caret_x = x;
    let mut previous = None;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = previous {
            caret_x += scaled.kern(prev, glyph_id);
        }
        previous = Some(glyph_id);

        let glyph =
            glyph_id.with_scale_and_position(pixel_height, ab_glyph::point(caret_x, baseline_y));
        caret_x += scaled.h_advance(glyph_id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let py = bounds.min.y + gy as f32;
            let shear = if synthetic_italic {
                (baseline_y - py) * ITALIC_SHEAR
            } else {
                0.0
            };
            let px = (bounds.min.x + gx as f32 + shear).round() as i32;
            blend(canvas, px, py as i32, color, coverage);
        });
    }
}

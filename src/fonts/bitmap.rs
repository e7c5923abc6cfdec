//! Built-in fallback face: Spleen 12×24, scaled with nearest neighbour.
//!
//! Always available and fully deterministic, which also makes it the face
//! used by the rendering tests. Each character occupies a fixed cell of
//! `size / 2` × `size` pixels.

use image::RgbImage;
use spleen_font::{FONT_12X24, PSF2Font};

use super::{ITALIC_SHEAR, blend};
use crate::render::color::Color;

const GLYPH_W: usize = 12;
const GLYPH_H: usize = 24;

/// Fraction of the cell height above the baseline.
pub const BASELINE: f32 = 0.8;

/// Cell width at `size` pixels.
pub fn cell_width(size: u32) -> u32 {
    (size * GLYPH_W as u32 / GLYPH_H as u32).max(1)
}

/// Cell height at `size` pixels.
pub fn cell_height(size: u32) -> u32 {
    size.max(1)
}

pub fn text_width(text: &str, size: u32) -> u32 {
    text.chars().count() as u32 * cell_width(size)
}

/// Draw `text` with its cell row's top-left corner at (`x`, `top`).
pub fn draw(
    canvas: &mut RgbImage,
    text: &str,
    size: u32,
    x: i32,
    top: i32,
    color: Color,
    synthetic_italic: bool,
) {
    let Ok(mut font) = PSF2Font::new(FONT_12X24) else {
        return;
    };
    let cell_w = cell_width(size) as usize;
    let cell_h = cell_height(size) as usize;
    let mut cursor_x = x;

    for ch in text.chars() {
        let source = glyph_bitmap(&mut font, ch);

        for dy in 0..cell_h {
            let shear = if synthetic_italic {
                ((cell_h - dy) as f32 * ITALIC_SHEAR).round() as i32
            } else {
                0
            };
            let sy = dy * GLYPH_H / cell_h;
            for dx in 0..cell_w {
                let sx = dx * GLYPH_W / cell_w;
                if source[sy * GLYPH_W + sx] {
                    blend(
                        canvas,
                        cursor_x + dx as i32 + shear,
                        top + dy as i32,
                        color,
                        1.0,
                    );
                }
            }
        }
        cursor_x += cell_w as i32;
    }
}

/// 12×24 on/off grid for `ch`; unknown characters render as a box.
fn glyph_bitmap(font: &mut PSF2Font, ch: char) -> Vec<bool> {
    let mut bitmap = vec![false; GLYPH_W * GLYPH_H];
    if ch.is_whitespace() {
        return bitmap;
    }

    let utf8 = ch.to_string();
    match font.glyph_for_utf8(utf8.as_bytes()) {
        Some(glyph) => {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < GLYPH_H && col_x < GLYPH_W {
                        bitmap[row_y * GLYPH_W + col_x] = on;
                    }
                }
            }
        }
        None => {
            for x in 1..GLYPH_W - 1 {
                bitmap[4 * GLYPH_W + x] = true;
                bitmap[(GLYPH_H - 3) * GLYPH_W + x] = true;
            }
            for y in 4..GLYPH_H - 2 {
                bitmap[y * GLYPH_W + 1] = true;
                bitmap[y * GLYPH_W + GLYPH_W - 2] = true;
            }
        }
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_metrics() {
        assert_eq!(cell_width(48), 24);
        assert_eq!(cell_width(97), 48);
        assert_eq!(cell_width(1), 1);
        assert_eq!(cell_height(30), 30);
        assert_eq!(text_width("Hello", 48), 120);
        assert_eq!(text_width("", 48), 0);
    }

    #[test]
    fn test_glyph_has_pixels() {
        let mut font = PSF2Font::new(FONT_12X24).unwrap();
        assert!(glyph_bitmap(&mut font, 'A').iter().any(|&on| on));
        assert!(glyph_bitmap(&mut font, ' ').iter().all(|&on| !on));
    }

    #[test]
    fn test_draw_stays_inside_cell() {
        let mut canvas = RgbImage::new(100, 60);
        draw(&mut canvas, "WW", 48, 10, 5, Color::WHITE, false);

        for (x, y, px) in canvas.enumerate_pixels() {
            if px[0] > 0 {
                assert!((10..58).contains(&x), "x={} outside cells", x);
                assert!((5..53).contains(&y), "y={} outside cell", y);
            }
        }
        assert!(canvas.pixels().any(|px| px[0] == 255));
    }
}

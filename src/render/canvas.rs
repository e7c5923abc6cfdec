//! # Canvas Rendering
//!
//! Paints the background and draws a [`RenderPlan`] onto an RGB canvas.
//!
//! ## Stroke
//!
//! Outlines are produced without an outline-font API: every word is first
//! drawn in the stroke colour at each offset within a disc of radius
//! `stroke.width` (the 8 neighbours for width 1), then all words are drawn
//! again in the fill colour on top.
//!
//! ```text
//!  · · ·
//!  · X ·    X = fill pass
//!  · · ·    · = stroke passes
//! ```

use image::RgbImage;

use crate::fonts::{FontSet, FontSpec};
use crate::layout::{Line, RenderPlan};
use crate::render::color::Color;

/// Underline distance below the baseline, as a fraction of the font size.
const UNDERLINE_OFFSET: f32 = 0.08;

/// Underline thickness, as a fraction of the font size.
const UNDERLINE_THICKNESS: f32 = 0.05;

/// Widest outline drawn, in pixels.
pub const MAX_STROKE_WIDTH: u32 = 20;

/// Axis along which a gradient changes colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GradientDirection {
    /// Top row = start colour, bottom row = end colour
    #[default]
    Vertical,
    /// Left column = start colour, right column = end colour
    Horizontal,
}

/// Two-colour linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientSpec {
    pub start: Color,
    pub end: Color,
    pub direction: GradientDirection,
}

impl GradientSpec {
    /// Colour at position `index` of `len` rows (or columns).
    pub fn color_at(&self, index: u32, len: u32) -> Color {
        if len <= 1 {
            return self.start;
        }
        self.start.lerp(self.end, index as f32 / (len - 1) as f32)
    }
}

/// Canvas background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Solid(Color),
    Gradient(GradientSpec),
}

impl Background {
    /// Single colour standing in for the background in contrast checks.
    pub fn reference_color(&self) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::Gradient(gradient) => gradient.start.average(gradient.end),
        }
    }
}

/// Text outline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub width: u32,
    pub color: Color,
}

impl Stroke {
    /// Offsets covering a disc of radius `width` (at most
    /// [`MAX_STROKE_WIDTH`]), excluding the centre.
    pub fn offsets(&self) -> Vec<(i32, i32)> {
        let r = self.width.min(MAX_STROKE_WIDTH) as i32;
        let mut offsets = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx, dy) != (0, 0) && dx * dx + dy * dy <= r * r + r {
                    offsets.push((dx, dy));
                }
            }
        }
        offsets
    }
}

/// Draws backgrounds and laid-out text.
pub struct CanvasRenderer<'a> {
    fonts: &'a FontSet,
    width: u32,
    height: u32,
}

impl<'a> CanvasRenderer<'a> {
    pub fn new(fonts: &'a FontSet, width: u32, height: u32) -> Self {
        Self {
            fonts,
            width,
            height,
        }
    }

    /// Paint the background, then the stroke passes, then the fill pass.
    pub fn render(
        &self,
        plan: &RenderPlan,
        background: &Background,
        text_color: Color,
        stroke: Option<Stroke>,
    ) -> RgbImage {
        let mut canvas = self.paint_background(background);

        if let Some(stroke) = stroke.filter(|s| s.width > 0) {
            for (dx, dy) in stroke.offsets() {
                for line in &plan.lines {
                    self.draw_line(&mut canvas, plan, line, (dx, dy), stroke.color);
                }
            }
        }
        for line in &plan.lines {
            self.draw_line(&mut canvas, plan, line, (0, 0), text_color);
        }
        canvas
    }

    pub fn paint_background(&self, background: &Background) -> RgbImage {
        match background {
            Background::Solid(color) => {
                RgbImage::from_pixel(self.width, self.height, color.to_rgb())
            }
            Background::Gradient(gradient) => {
                RgbImage::from_fn(self.width, self.height, |x, y| {
                    let color = match gradient.direction {
                        GradientDirection::Vertical => gradient.color_at(y, self.height),
                        GradientDirection::Horizontal => gradient.color_at(x, self.width),
                    };
                    color.to_rgb()
                })
            }
        }
    }

    fn draw_line(
        &self,
        canvas: &mut RgbImage,
        plan: &RenderPlan,
        line: &Line,
        (dx, dy): (i32, i32),
        color: Color,
    ) {
        let top = line.y + dy;
        let underline_y = top + self.underline_offset(plan.font_size);
        let thickness = ((plan.font_size as f32 * UNDERLINE_THICKNESS).round() as u32).max(1);

        let mut previous_right: Option<i32> = None;
        for word in &line.words {
            if let Some(right) = previous_right
                && word.gap_style.underline
            {
                fill_rect(canvas, right + dx, underline_y, word.x - right, thickness, color);
            }

            for piece in &word.pieces {
                let x = word.x + piece.offset + dx;
                self.fonts.draw_text(
                    canvas,
                    &piece.text,
                    FontSpec::new(piece.style, plan.font_size),
                    x,
                    top,
                    color,
                );
                if piece.style.underline {
                    fill_rect(canvas, x, underline_y, piece.width as i32, thickness, color);
                }
            }
            previous_right = Some(word.right());
        }
    }

    fn underline_offset(&self, size: u32) -> i32 {
        let below = (size as f32 * UNDERLINE_OFFSET).round().max(1.0);
        (self.fonts.ascent(size) + below).round() as i32
    }
}

fn fill_rect(canvas: &mut RgbImage, x: i32, y: i32, width: i32, height: u32, color: Color) {
    for py in y..y + height as i32 {
        for px in x..x + width {
            crate::fonts::blend(canvas, px, py, color, 1.0);
        }
    }
}

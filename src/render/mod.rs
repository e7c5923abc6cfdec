//! # Rendering Module
//!
//! Turns a text request into the 240×240 canvas the display shows.
//!
//! ## Modules
//!
//! - [`color`]: Colour parsing, contrast and stroke colour selection
//! - [`canvas`]: Backgrounds, gradients and stroked text drawing
//! - [`encode`]: JPEG encoding, image file preparation, local copies
//!
//! ## Pipeline
//!
//! ```text
//! text ──► markup ──► layout (wrap + size) ──► canvas ──► JPEG
//!                         ▲
//!                 stroke widens line spacing
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use slotframe::config::Config;
//! use slotframe::fonts::FontSet;
//! use slotframe::render::{self, TextFrame};
//!
//! let config = Config::default();
//! let frame = render::generate(&TextFrame::new("Hello"), &config, &FontSet::builtin()).unwrap();
//! assert_eq!(frame.image.dimensions(), (240, 240));
//! ```

pub mod canvas;
pub mod color;
pub mod encode;

use image::RgbImage;
use log::{debug, warn};

use crate::config::{Config, Padding};
use crate::error::SlotframeError;
use crate::fonts::FontSet;
use crate::layout::{Align, LayoutBox, LayoutEngine, RenderPlan, SizeMode};
use crate::markup;

pub use canvas::{
    Background, CanvasRenderer, GradientDirection, GradientSpec, MAX_STROKE_WIDTH, Stroke,
};
pub use color::{Color, ColorResolver};

/// Contrast ratio below which an outline is added automatically.
pub const AUTO_STROKE_CONTRAST: f64 = 7.0;

/// How the caller asked for an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeRequest {
    /// `--text-stroke`
    pub enabled: bool,
    /// Explicit width; 0 = none given
    pub width: u32,
    /// Explicit colour; `None` picks a contrasting one
    pub color: Option<Color>,
    /// Allow a 1 px outline when contrast is poor
    pub auto: bool,
}

impl Default for StrokeRequest {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 0,
            color: None,
            auto: true,
        }
    }
}

impl StrokeRequest {
    /// True when any stroke option was given.
    pub fn is_explicit(&self) -> bool {
        self.enabled || self.width > 0 || self.color.is_some()
    }
}

/// Decide the outline actually drawn.
///
/// | Request | Result |
/// |---------|--------|
/// | width > 0 | that width, given colour or contrasting one |
/// | `enabled`, no width | width 1 |
/// | explicit, auto on, contrast < 7, text not white | width 1 |
/// | otherwise | none |
pub fn resolve_stroke(request: &StrokeRequest, text: Color, background: Color) -> Option<Stroke> {
    let color = request
        .color
        .unwrap_or_else(|| color::pick_contrasting_stroke(text));

    let width = if request.enabled && request.width == 0 {
        1
    } else {
        request.width
    };
    if width > 0 {
        return Some(Stroke { width, color });
    }

    let contrast = color::contrast_ratio(text, background);
    if request.is_explicit()
        && request.auto
        && contrast < AUTO_STROKE_CONTRAST
        && text != Color::WHITE
    {
        debug!("Contrast {:.2} is low, adding a 1px outline", contrast);
        return Some(Stroke { width: 1, color });
    }
    None
}

/// A text frame to render.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    pub text: String,
    /// Parse markup even when no tag is detected
    pub force_markup: bool,
    pub size: SizeMode,
    pub align: Align,
    pub text_color: Color,
    pub background: Background,
    pub stroke: StrokeRequest,
    /// `None` uses the configured padding
    pub padding: Option<Padding>,
}

impl TextFrame {
    /// White auto-sized centred text on black.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            force_markup: false,
            size: SizeMode::Auto,
            align: Align::Center,
            text_color: Color::WHITE,
            background: Background::Solid(Color::BLACK),
            stroke: StrokeRequest::default(),
            padding: None,
        }
    }

    pub fn with_size(mut self, size: SizeMode) -> Self {
        self.size = size;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_colors(mut self, text: Color, background: Background) -> Self {
        self.text_color = text;
        self.background = background;
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeRequest) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = Some(padding);
        self
    }
}

/// A rendered canvas and the plan it was drawn from.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbImage,
    pub plan: RenderPlan,
    pub stroke: Option<Stroke>,
}

/// Render `frame` onto a canvas of the configured size.
///
/// Degraded layouts (text overflowing at the minimum size) still produce an
/// image; the condition is logged and kept on [`Frame::plan`].
pub fn generate(frame: &TextFrame, config: &Config, fonts: &FontSet) -> Result<Frame, SlotframeError> {
    let display = &config.display;
    let padding = frame.padding.unwrap_or(config.image.padding);
    let layout_box = LayoutBox::from_canvas(display.width, display.height, padding)?;

    if frame.stroke.width > MAX_STROKE_WIDTH {
        return Err(SlotframeError::InvalidStrokeWidth(frame.stroke.width));
    }

    let parsed = markup::parse_auto(&frame.text, frame.force_markup);
    let stroke = resolve_stroke(
        &frame.stroke,
        frame.text_color,
        frame.background.reference_color(),
    );
    let stroke_width = stroke.map_or(0, |s| s.width);

    let engine = LayoutEngine::new(&config.image)
        .with_line_spacing(config.image.line_spacing.saturating_add(2 * stroke_width));
    let plan = engine.layout(fonts, &parsed.runs, layout_box, frame.size, frame.align)?;

    if let Some(degraded) = &plan.degraded {
        warn!("{}", degraded);
    }
    debug!(
        "Laid out {} line(s) at size {} (block {}px)",
        plan.lines.len(),
        plan.font_size,
        plan.block_height
    );

    let image = CanvasRenderer::new(fonts, display.width, display.height).render(
        &plan,
        &frame.background,
        frame.text_color,
        stroke,
    );

    Ok(Frame {
        image,
        plan,
        stroke,
    })
}

//! # Fonts
//!
//! Face selection, measurement and glyph drawing.
//!
//! A [`FontSet`] holds one face per style combination (regular, bold,
//! italic, bold-italic). Faces come from TrueType files when available
//! ([`outline`]) and from the built-in Spleen bitmap font otherwise
//! ([`bitmap`]). Variants missing on disk are synthesised from the
//! closest available face:
//!
//! - **bold**: double strike, the second pass one pixel to the right
//! - **italic**: glyph rows sheared to the right above the baseline
//!
//! ## Discovery Order
//!
//! 1. Explicit font path (errors are fatal)
//! 2. Well-known system font locations
//! 3. Built-in bitmap face (logged as a warning)

pub mod bitmap;
pub mod outline;

use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use image::RgbImage;
use log::{debug, warn};

use crate::error::SlotframeError;
use crate::layout::Measure;
use crate::markup::Style;
use crate::render::color::Color;

/// Horizontal shift per pixel of height for synthetic italics.
pub(crate) const ITALIC_SHEAR: f32 = 0.2;

/// Regular faces tried when no font path is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Verdana.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\calibri.ttf",
    "C:\\Windows\\Fonts\\verdana.ttf",
];

const BOLD_SUFFIXES: &[&str] = &["-Bold", "bd", "b", "B"];
const ITALIC_SUFFIXES: &[&str] = &["-Italic", "-Oblique", "i", "I"];
const BOLD_ITALIC_SUFFIXES: &[&str] = &["-BoldItalic", "-BoldOblique", "bi", "BI", "z"];

/// A face choice for one run of text: style flags plus pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub style: Style,
    pub size: u32,
}

impl FontSpec {
    pub fn new(style: Style, size: u32) -> Self {
        Self { style, size }
    }
}

/// Glyph source for one face.
#[derive(Clone)]
pub enum Face {
    Outline(FontArc),
    Bitmap,
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Outline(_) => f.write_str("Outline"),
            Face::Bitmap => f.write_str("Bitmap"),
        }
    }
}

/// A face plus the styling it has to fake.
#[derive(Debug, Clone)]
struct Variant {
    face: Face,
    synthetic_bold: bool,
    synthetic_italic: bool,
}

impl Variant {
    fn real(face: Face) -> Self {
        Self {
            face,
            synthetic_bold: false,
            synthetic_italic: false,
        }
    }

    fn faking(mut self, bold: bool, italic: bool) -> Self {
        self.synthetic_bold |= bold;
        self.synthetic_italic |= italic;
        self
    }
}

/// Regular, bold, italic and bold-italic faces of one family.
#[derive(Debug, Clone)]
pub struct FontSet {
    regular: Variant,
    bold: Variant,
    italic: Variant,
    bold_italic: Variant,
}

impl FontSet {
    /// The built-in bitmap family.
    pub fn builtin() -> Self {
        let base = Variant::real(Face::Bitmap);
        Self {
            bold: base.clone().faking(true, false),
            italic: base.clone().faking(false, true),
            bold_italic: base.clone().faking(true, true),
            regular: base,
        }
    }

    /// Load the regular face at `path` and look for style variants beside it.
    pub fn from_path(path: &Path) -> Result<Self, SlotframeError> {
        let regular = outline::load(path)?;
        let find = |suffixes: &[&str]| {
            variant_candidates(path, suffixes)
                .into_iter()
                .find_map(|candidate| outline::load(&candidate).ok().map(Face::Outline))
        };

        let bold = find(BOLD_SUFFIXES);
        let italic = find(ITALIC_SUFFIXES);
        let bold_italic = find(BOLD_ITALIC_SUFFIXES);
        debug!(
            "Loaded font {} (bold: {}, italic: {}, bold-italic: {})",
            path.display(),
            bold.is_some(),
            italic.is_some(),
            bold_italic.is_some()
        );

        let regular = Variant::real(Face::Outline(regular));
        let bold = bold
            .map(Variant::real)
            .unwrap_or_else(|| regular.clone().faking(true, false));
        let italic = italic
            .map(Variant::real)
            .unwrap_or_else(|| regular.clone().faking(false, true));
        let bold_italic = match bold_italic {
            Some(face) => Variant::real(face),
            None if !bold.synthetic_bold => bold.clone().faking(false, true),
            None if !italic.synthetic_italic => italic.clone().faking(true, false),
            None => regular.clone().faking(true, true),
        };

        Ok(Self {
            regular,
            bold,
            italic,
            bold_italic,
        })
    }

    /// Explicit path first, then system fonts, then the built-in face.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, SlotframeError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        for candidate in SYSTEM_FONTS {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match Self::from_path(path) {
                Ok(fonts) => return Ok(fonts),
                Err(e) => debug!("Skipping {}: {}", candidate, e),
            }
        }

        warn!("No TrueType font found, using the built-in bitmap font");
        Ok(Self::builtin())
    }

    /// True when every face is the built-in bitmap font.
    pub fn is_builtin(&self) -> bool {
        matches!(self.regular.face, Face::Bitmap)
    }

    fn variant(&self, style: Style) -> &Variant {
        match (style.bold, style.italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }

    /// Rightmost shift of a sheared glyph row past its advance.
    fn italic_overhang(&self, face: &Face, size: u32) -> u32 {
        let rise = match face {
            Face::Outline(font) => outline::ascent(font, size as f32),
            Face::Bitmap => bitmap::cell_height(size) as f32,
        };
        (rise * ITALIC_SHEAR).ceil() as u32
    }

    /// Distance from the top of a line box to the baseline.
    pub fn ascent(&self, size: u32) -> f32 {
        match &self.regular.face {
            Face::Outline(font) => outline::ascent(font, size as f32),
            Face::Bitmap => bitmap::cell_height(size) as f32 * bitmap::BASELINE,
        }
    }

    /// Draw `text` with its line box's top-left corner at (`x`, `top`).
    pub fn draw_text(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        spec: FontSpec,
        x: i32,
        top: i32,
        color: Color,
    ) {
        let variant = self.variant(spec.style);
        let passes: &[i32] = if variant.synthetic_bold { &[0, 1] } else { &[0] };

        for &dx in passes {
            match &variant.face {
                Face::Outline(font) => outline::draw(
                    canvas,
                    font,
                    text,
                    spec.size as f32,
                    (x + dx) as f32,
                    top as f32,
                    color,
                    variant.synthetic_italic,
                ),
                Face::Bitmap => bitmap::draw(
                    canvas,
                    text,
                    spec.size,
                    x + dx,
                    top,
                    color,
                    variant.synthetic_italic,
                ),
            }
        }
    }
}

impl Measure for FontSet {
    fn text_width(&self, text: &str, spec: FontSpec) -> u32 {
        let variant = self.variant(spec.style);
        let width = match &variant.face {
            Face::Outline(font) => outline::text_width(font, text, spec.size as f32).ceil() as u32,
            Face::Bitmap => bitmap::text_width(text, spec.size),
        };
        if width == 0 {
            return 0;
        }
        let bold = u32::from(variant.synthetic_bold);
        let italic = if variant.synthetic_italic && !text.trim().is_empty() {
            self.italic_overhang(&variant.face, spec.size)
        } else {
            0
        };
        width + bold + italic
    }

    fn line_height(&self, size: u32) -> u32 {
        match &self.regular.face {
            Face::Outline(font) => outline::line_height(font, size as f32).ceil() as u32,
            Face::Bitmap => bitmap::cell_height(size),
        }
    }
}

/// Sibling files that may hold a style variant of `base`.
///
/// `DejaVuSans.ttf` yields `DejaVuSans-Bold.ttf`, `DejaVuSansbd.ttf`, ...;
/// a `-Regular` stem suffix is dropped first so `Foo-Regular.ttf` pairs
/// with `Foo-Bold.ttf`.
fn variant_candidates(base: &Path, suffixes: &[&str]) -> Vec<PathBuf> {
    let Some(stem) = base.file_stem().and_then(|s| s.to_str()) else {
        return Vec::new();
    };
    let stem = stem.strip_suffix("-Regular").unwrap_or(stem);
    let extension = base.extension().and_then(|e| e.to_str()).unwrap_or("ttf");

    suffixes
        .iter()
        .map(|suffix| base.with_file_name(format!("{}{}.{}", stem, suffix, extension)))
        .collect()
}

/// Alpha-blend `color` onto one canvas pixel; out-of-bounds writes are clipped.
pub(crate) fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage <= 0.0 {
        return;
    }
    let px = canvas.get_pixel_mut(x as u32, y as u32);
    *px = Color::from(*px).lerp(color, coverage).to_rgb();
}

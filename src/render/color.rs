//! # Colour Resolution
//!
//! Turns user colour specs into RGB values and picks legible stroke colours.
//!
//! ## Accepted Specs
//!
//! | Form | Example |
//! |------|---------|
//! | Name | `red`, `Turquoise` |
//! | Scheme name | `light` (uses the scheme's text colour) |
//! | Hex | `#ff8800`, `FF8800` |
//! | RGB | `255, 136, 0` |
//!
//! Parsing is a two-step dispatch: [`ColorSpec::parse`] classifies the
//! string, [`ColorResolver::resolve_spec`] maps the classified spec to a
//! [`Color`]. Anything unrecognised is an [`SlotframeError::InvalidColor`];
//! there is no silent fallback.

use crate::config::{ColorScheme, NAMED_COLORS};
use crate::error::SlotframeError;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation towards `other`; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Channel-wise average (integer, rounding down).
    pub fn average(self, other: Color) -> Color {
        let avg = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
        Color::rgb(avg(self.r, other.r), avg(self.g, other.g), avg(self.b, other.b))
    }

    /// Perceived brightness (ITU-R BT.601 weights), 0-255.
    pub fn brightness(self) -> f32 {
        (self.r as f32 * 299.0 + self.g as f32 * 587.0 + self.b as f32 * 114.0) / 1000.0
    }

    pub fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(px: image::Rgb<u8>) -> Self {
        Color::rgb(px[0], px[1], px[2])
    }
}

/// A classified colour spec, not yet resolved against the name tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpec {
    Named(String),
    Hex(Color),
    Rgb(Color),
}

impl ColorSpec {
    pub fn parse(spec: &str) -> Result<ColorSpec, SlotframeError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(invalid(spec, "empty color"));
        }

        if trimmed.contains(',') {
            return parse_rgb_triplet(trimmed)
                .map(ColorSpec::Rgb)
                .ok_or_else(|| invalid(spec, "expected r,g,b with each component in 0-255"));
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex)
                .map(ColorSpec::Hex)
                .ok_or_else(|| invalid(spec, "expected #RRGGBB"));
        }

        if let Some(color) = parse_hex(trimmed) {
            return Ok(ColorSpec::Hex(color));
        }

        Ok(ColorSpec::Named(trimmed.to_ascii_lowercase()))
    }
}

fn invalid(spec: &str, reason: &str) -> SlotframeError {
    SlotframeError::InvalidColor(format!("'{}': {}", spec, reason))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_rgb_triplet(spec: &str) -> Option<Color> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }
    // Parse as u16 first so 256 is rejected rather than wrapping
    let channel = |s: &str| s.parse::<u16>().ok().filter(|v| *v <= 255).map(|v| v as u8);
    Some(Color::rgb(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
    ))
}

/// Resolves colour specs against a name table.
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'a> {
    names: &'a [(&'a str, Color)],
}

impl Default for ColorResolver<'static> {
    fn default() -> Self {
        Self::new(&NAMED_COLORS)
    }
}

impl<'a> ColorResolver<'a> {
    pub fn new(names: &'a [(&'a str, Color)]) -> Self {
        Self { names }
    }

    /// Parse and resolve a colour spec.
    pub fn resolve(&self, spec: &str) -> Result<Color, SlotframeError> {
        self.resolve_spec(&ColorSpec::parse(spec)?)
    }

    pub fn resolve_spec(&self, spec: &ColorSpec) -> Result<Color, SlotframeError> {
        match spec {
            ColorSpec::Hex(color) | ColorSpec::Rgb(color) => Ok(*color),
            ColorSpec::Named(name) => self
                .names
                .iter()
                .find(|(known, _)| *known == name.as_str())
                .map(|(_, color)| *color)
                .or_else(|| ColorScheme::by_name(name).map(ColorScheme::text))
                .ok_or_else(|| invalid(name, "unknown color name")),
        }
    }
}

/// WCAG relative luminance of an sRGB colour, in [0, 1].
pub fn relative_luminance(color: Color) -> f64 {
    fn linear(channel: u8) -> f64 {
        let c = channel as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linear(color.r) + 0.7152 * linear(color.g) + 0.0722 * linear(color.b)
}

/// WCAG contrast ratio between two colours, in [1, 21].
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (light, dark) = if la > lb { (la, lb) } else { (lb, la) };
    (light + 0.05) / (dark + 0.05)
}

/// Black or white, whichever outlines `text` more legibly.
///
/// Decided on perceived brightness: colours brighter than mid-grey get a
/// black outline, everything else (including exactly mid-grey) a white one.
/// Saturated primaries such as pure red or blue therefore get white.
pub fn pick_contrasting_stroke(text: Color) -> Color {
    if text.brightness() > 128.0 {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

//! # Text Layout
//!
//! Chooses a font size, wraps words into lines and positions every word
//! inside the layout box.
//!
//! ## Auto Sizing
//!
//! A candidate size is *feasible* when, after wrapping at that size:
//!
//! ```text
//! lines × (line_height + spacing) − spacing  ≤  box height
//! every line's width                          ≤  box width
//! ```
//!
//! Feasibility only flips once as the size grows, so a "largest feasible"
//! binary search over [min, max] finds the answer in ⌈log2(max − min + 1)⌉
//! steps (8 for the default range 10–200). When even the minimum size
//! overflows, auto mode keeps the minimum and reports [`LayoutDegraded`];
//! fixed mode fails with [`SlotframeError::TextTooLarge`].
//!
//! ## Placement
//!
//! The block is centred vertically. Horizontally each line is placed by
//! [`Align`]; justified lines stretch the gaps between words so the last
//! word ends exactly at the box's right edge. The last line and single-word
//! lines of a justified block are left-aligned.

pub mod wrap;

use std::fmt;

use log::debug;

use crate::config::{ImageConfig, Padding};
use crate::error::SlotframeError;
use crate::fonts::FontSpec;
use crate::markup::{Style, StyledRun};

pub use wrap::{Token, tokenize};

/// Text measurement at a given font.
pub trait Measure {
    /// Advance width of `text` in whole pixels.
    fn text_width(&self, text: &str, spec: FontSpec) -> u32;

    /// Height of one line box at `size`.
    fn line_height(&self, size: u32) -> u32;
}

/// The drawable region: canvas minus padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl LayoutBox {
    /// Fails when the padding leaves no room in either direction.
    pub fn from_canvas(width: u32, height: u32, padding: Padding) -> Result<Self, SlotframeError> {
        let horizontal = padding.left.saturating_add(padding.right);
        let vertical = padding.top.saturating_add(padding.bottom);
        if horizontal >= width || vertical >= height {
            return Err(SlotframeError::Layout(format!(
                "padding (top {}, bottom {}, left {}, right {}) leaves no room on a {}x{} canvas",
                padding.top, padding.bottom, padding.left, padding.right, width, height
            )));
        }
        Ok(Self {
            left: padding.left,
            top: padding.top,
            width: width - horizontal,
            height: height - vertical,
        })
    }

    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Horizontal alignment of lines within the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
    Justify,
}

/// How the font size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMode {
    /// Largest size in range that fits
    Auto,
    /// Exactly this size, or an error if it does not fit
    Fixed(u32),
}

/// Part of a word with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub text: String,
    pub style: Style,
    pub width: u32,
    /// Horizontal offset from the start of the word
    pub offset: i32,
}

/// A measured word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub pieces: Vec<Piece>,
    pub width: u32,
    /// Style of the whitespace before this word (underlined gaps)
    pub gap_style: Style,
    /// Natural width of that whitespace
    pub gap_width: u32,
    /// Absolute x of the word's left edge once placed
    pub x: i32,
}

impl Word {
    pub fn text(&self) -> String {
        self.pieces.iter().map(|p| p.text.as_str()).collect()
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }
}

/// One wrapped, positioned line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub words: Vec<Word>,
    /// Left edge of the first word
    pub x: i32,
    /// Top of the line box
    pub y: i32,
    /// Rendered width (box width for justified lines)
    pub width: u32,
    /// Gap used between words when the line is justified
    pub justified_gap: Option<f32>,
}

impl Line {
    fn unplaced(words: Vec<Word>, width: u32) -> Self {
        Self {
            words,
            x: 0,
            y: 0,
            width,
            justified_gap: None,
        }
    }

    pub fn text(&self) -> String {
        self.words.iter().map(Word::text).collect::<Vec<_>>().join(" ")
    }
}

/// Auto mode overflowed even at the minimum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDegraded {
    pub font_size: u32,
    pub block_height: u32,
    pub box_height: u32,
    pub widest_line: u32,
    pub box_width: u32,
}

impl fmt::Display for LayoutDegraded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "text overflows at the minimum font size {} ({}x{} needed, {}x{} available); output will be clipped",
            self.font_size, self.widest_line, self.block_height, self.box_width, self.box_height
        )
    }
}

/// Everything the renderer needs to draw the text block.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub lines: Vec<Line>,
    pub font_size: u32,
    pub line_height: u32,
    pub line_spacing: u32,
    pub block_height: u32,
    /// Top of the first line
    pub top: i32,
    pub layout_box: LayoutBox,
    pub degraded: Option<LayoutDegraded>,
}

/// Font-size search and line placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEngine {
    pub min_size: u32,
    pub max_size: u32,
    pub line_spacing: u32,
}

impl LayoutEngine {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            min_size: config.min_font_size.max(1),
            max_size: config.max_font_size,
            line_spacing: config.line_spacing,
        }
    }

    pub fn with_line_spacing(mut self, line_spacing: u32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Height of `lines` stacked lines.
    pub fn block_height(&self, lines: usize, line_height: u32) -> u32 {
        match lines {
            0 => 0,
            n => n as u32 * (line_height + self.line_spacing) - self.line_spacing,
        }
    }

    /// Whether the wrapped text fits the box at `size`.
    pub fn fits(&self, measure: &dyn Measure, tokens: &[Token], size: u32, bx: LayoutBox) -> bool {
        let lines = wrap::wrap(measure, tokens, size, bx.width);
        lines.iter().all(|line| line.width <= bx.width)
            && self.block_height(lines.len(), measure.line_height(size)) <= bx.height
    }

    /// Largest size in range that fits, or `None` when none does.
    pub fn auto_size(&self, measure: &dyn Measure, tokens: &[Token], bx: LayoutBox) -> Option<u32> {
        let (mut low, mut high) = (self.min_size, self.max_size);
        let mut best = None;

        while low <= high {
            let mid = low + (high - low) / 2;
            let fits = self.fits(measure, tokens, mid, bx);
            debug!("auto-size: {} in [{}, {}] fits={}", mid, low, high, fits);
            if fits {
                best = Some(mid);
                low = mid + 1;
            } else if mid == 0 {
                break;
            } else {
                high = mid - 1;
            }
        }
        best
    }

    /// Size, wrap and position `runs` inside `bx`.
    pub fn layout(
        &self,
        measure: &dyn Measure,
        runs: &[StyledRun],
        bx: LayoutBox,
        mode: SizeMode,
        align: Align,
    ) -> Result<RenderPlan, SlotframeError> {
        let tokens = tokenize(runs);

        let (font_size, overflowing) = match mode {
            SizeMode::Auto => match self.auto_size(measure, &tokens, bx) {
                Some(size) => (size, false),
                None => (self.min_size, true),
            },
            SizeMode::Fixed(size) => {
                if !(self.min_size..=self.max_size).contains(&size) {
                    return Err(SlotframeError::InvalidFontSize(size));
                }
                if !self.fits(measure, &tokens, size, bx) {
                    return Err(SlotframeError::TextTooLarge {
                        size,
                        largest_fitting: self.auto_size(measure, &tokens, bx),
                    });
                }
                (size, false)
            }
        };

        let mut lines = wrap::wrap(measure, &tokens, font_size, bx.width);
        let line_height = measure.line_height(font_size);
        let block_height = self.block_height(lines.len(), line_height);
        let top = bx.top as i32 + (bx.height as i32 - block_height as i32) / 2;

        let count = lines.len();
        for (i, line) in lines.iter_mut().enumerate() {
            line.y = top + (i as u32 * (line_height + self.line_spacing)) as i32;
            place_line(line, bx, align, i + 1 == count);
        }

        let degraded = overflowing.then(|| LayoutDegraded {
            font_size,
            block_height,
            box_height: bx.height,
            widest_line: lines.iter().map(|l| l.width).max().unwrap_or(0),
            box_width: bx.width,
        });

        Ok(RenderPlan {
            lines,
            font_size,
            line_height,
            line_spacing: self.line_spacing,
            block_height,
            top,
            layout_box: bx,
            degraded,
        })
    }
}

/// Set the x of the line and of each word.
fn place_line(line: &mut Line, bx: LayoutBox, align: Align, is_last: bool) {
    if align == Align::Justify && !is_last && line.words.len() >= 2 {
        let words_width: u32 = line.words.iter().map(|w| w.width).sum();
        let gap = bx.width.saturating_sub(words_width) as f32 / (line.words.len() - 1) as f32;

        let mut preceding = 0i32;
        for (k, word) in line.words.iter_mut().enumerate() {
            word.x = bx.left as i32 + preceding + (k as f32 * gap).round() as i32;
            preceding += word.width as i32;
        }
        line.x = bx.left as i32;
        line.width = bx.width;
        line.justified_gap = Some(gap);
        return;
    }

    let free = bx.width as i32 - line.width as i32;
    line.x = bx.left as i32
        + match align {
            Align::Left | Align::Justify => 0,
            Align::Center => free / 2,
            Align::Right => free,
        };

    let mut x = line.x;
    for (k, word) in line.words.iter_mut().enumerate() {
        if k > 0 {
            x += word.gap_width as i32;
        }
        word.x = x;
        x += word.width as i32;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::markup;
    use pretty_assertions::assert_eq;

    /// Half-size advance per char (+1 for bold), line height = size.
    pub(crate) struct Mono;

    impl Measure for Mono {
        fn text_width(&self, text: &str, spec: FontSpec) -> u32 {
            let per_char = spec.size / 2 + u32::from(spec.style.bold);
            text.chars().count() as u32 * per_char
        }

        fn line_height(&self, size: u32) -> u32 {
            size
        }
    }

    fn engine() -> LayoutEngine {
        LayoutEngine::new(&ImageConfig::default())
    }

    fn default_box() -> LayoutBox {
        LayoutBox::from_canvas(240, 240, Padding::default()).unwrap()
    }

    fn plan(text: &str, mode: SizeMode, align: Align) -> RenderPlan {
        let parsed = markup::parse_auto(text, false);
        engine()
            .layout(&Mono, &parsed.runs, default_box(), mode, align)
            .unwrap()
    }

    const JUSTIFY_TEXT: &str = "This is a longer text that will be justified across the full width";

    #[test]
    fn test_layout_box_from_padding() {
        assert_eq!(
            default_box(),
            LayoutBox {
                left: 0,
                top: 0,
                width: 240,
                height: 215
            }
        );
        let bx = LayoutBox::from_canvas(240, 240, Padding::uniform(20)).unwrap();
        assert_eq!((bx.left, bx.top, bx.right(), bx.bottom()), (20, 20, 220, 220));
    }

    #[test]
    fn test_padding_consuming_canvas_fails_fast() {
        for padding in [
            Padding::uniform(120),
            Padding::default().with_left(200).with_right(40),
            Padding::default().with_top(u32::MAX),
        ] {
            assert!(matches!(
                LayoutBox::from_canvas(240, 240, padding),
                Err(SlotframeError::Layout(_))
            ));
        }
    }

    #[test]
    fn test_single_word_auto_centered() {
        let plan = plan("Hello", SizeMode::Auto, Align::Center);
        // 5 chars × 48px = 240px at size 97; size 98 needs 245px
        assert_eq!(plan.font_size, 97);
        assert_eq!(plan.lines.len(), 1);
        assert_eq!(plan.lines[0].width, 240);
        assert_eq!(plan.lines[0].x, 0);
        assert_eq!(plan.block_height, 97);
        assert_eq!(plan.top, (215 - 97) / 2);
        assert_eq!(plan.degraded, None);
    }

    #[test]
    fn test_auto_size_is_largest_feasible() {
        let bx = default_box();
        let engine = engine();
        for text in ["Hello", "Hi there", JUSTIFY_TEXT, "a b c d e f g h i j k l m n o p", "x"] {
            let tokens = tokenize(&[StyledRun::plain(text)]);
            let best = engine.auto_size(&Mono, &tokens, bx).unwrap();
            for size in engine.min_size..=engine.max_size {
                assert_eq!(
                    engine.fits(&Mono, &tokens, size, bx),
                    size <= best,
                    "{:?} at size {} (best {})",
                    text,
                    size,
                    best
                );
            }
        }
    }

    #[test]
    fn test_empty_text_takes_max_size() {
        let plan = plan("", SizeMode::Auto, Align::Center);
        assert!(plan.lines.is_empty());
        assert_eq!(plan.font_size, 200);
        assert_eq!(plan.block_height, 0);
    }

    #[test]
    fn test_alignment_offsets() {
        let left = plan("ab cd", SizeMode::Fixed(20), Align::Left);
        let right = plan("ab cd", SizeMode::Fixed(20), Align::Right);
        let center = plan("ab cd", SizeMode::Fixed(20), Align::Center);

        // "ab cd" = 5 chars × 10px
        assert_eq!(left.lines[0].width, 50);
        assert_eq!(left.lines[0].x, 0);
        assert_eq!(right.lines[0].x, 190);
        assert_eq!(center.lines[0].x, 95);

        let words: Vec<i32> = right.lines[0].words.iter().map(|w| w.x).collect();
        assert_eq!(words, vec![190, 220]);
    }

    #[test]
    fn test_vertical_centering_multi_line() {
        let plan = plan("aaaa bbbb cccc", SizeMode::Fixed(40), Align::Left);
        // 20px per char: "aaaa bbbb" = 180px, adding "cccc" would need 280px
        assert_eq!(plan.lines.len(), 2);
        assert_eq!(plan.block_height, 2 * (40 + 10) - 10);
        assert_eq!(plan.top, (215 - 90) / 2);
        assert_eq!(plan.lines[0].y, plan.top);
        assert_eq!(plan.lines[1].y, plan.top + 50);
    }

    #[test]
    fn test_justify_fills_box_width() {
        let plan = plan(JUSTIFY_TEXT, SizeMode::Auto, Align::Justify);
        assert!(plan.lines.len() > 1);

        let bx = plan.layout_box;
        let mut justified = 0;
        for line in &plan.lines[..plan.lines.len() - 1] {
            if line.words.len() < 2 {
                assert_eq!(line.x, bx.left as i32);
                continue;
            }
            justified += 1;
            let gap = line.justified_gap.unwrap();
            let words: u32 = line.words.iter().map(|w| w.width).sum();
            let total = words as f32 + gap * (line.words.len() - 1) as f32;
            assert!((total - bx.width as f32).abs() < 0.01, "line {:?}", line.text());
            assert_eq!(line.width, bx.width);
            assert_eq!(line.words.last().unwrap().right(), bx.right() as i32);
            assert_eq!(line.words[0].x, bx.left as i32);
        }
        assert!(justified > 0);

        let last = plan.lines.last().unwrap();
        assert_eq!(last.justified_gap, None);
        assert_eq!(last.x, bx.left as i32);
    }

    #[test]
    fn test_justify_gap_rounding() {
        let bx = LayoutBox {
            left: 3,
            top: 0,
            width: 103,
            height: 100,
        };
        let parsed = markup::parse("aa bb cc dd ee ff gg hh");
        let plan = engine()
            .with_line_spacing(0)
            .layout(&Mono, &parsed.runs, bx, SizeMode::Fixed(10), Align::Justify)
            .unwrap();

        for line in &plan.lines[..plan.lines.len() - 1] {
            let gap = line.justified_gap.unwrap();
            for pair in line.words.windows(2) {
                let actual = (pair[1].x - pair[0].right()) as f32;
                assert!((actual - gap).abs() <= 1.0, "gap {} vs {}", actual, gap);
            }
        }
    }

    #[test]
    fn test_auto_degrades_to_minimum() {
        let long = "W".repeat(60);
        let plan = plan(&long, SizeMode::Auto, Align::Center);
        assert_eq!(plan.font_size, 10);
        let degraded = plan.degraded.expect("should report degradation");
        assert_eq!(degraded.widest_line, 300);
        assert_eq!(degraded.box_width, 240);
        // Overflowing line is still centred (negative offset, clipped when drawn)
        assert_eq!(plan.lines[0].x, -30);
    }

    #[test]
    fn test_fixed_size_too_large() {
        let parsed = markup::parse("Hello");
        let err = engine()
            .layout(&Mono, &parsed.runs, default_box(), SizeMode::Fixed(150), Align::Center)
            .unwrap_err();
        match err {
            SlotframeError::TextTooLarge {
                size,
                largest_fitting,
            } => {
                assert_eq!(size, 150);
                assert_eq!(largest_fitting, Some(97));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_fixed_size_out_of_range() {
        let parsed = markup::parse("Hello");
        for size in [5, 201] {
            assert!(matches!(
                engine().layout(&Mono, &parsed.runs, default_box(), SizeMode::Fixed(size), Align::Left),
                Err(SlotframeError::InvalidFontSize(s)) if s == size
            ));
        }
    }

    #[test]
    fn test_styled_words_keep_their_styles() {
        let plan = plan("<b>Hi</b> there", SizeMode::Fixed(20), Align::Left);
        let words = &plan.lines[0].words;
        assert_eq!(words[0].pieces[0].style, Style::BOLD);
        assert_eq!(words[1].pieces[0].style, Style::PLAIN);
        // Bold adds a pixel per char in Mono
        assert_eq!(words[0].width, 22);
        assert_eq!(words[1].x, 22 + 10);
    }
}

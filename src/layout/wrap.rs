//! Word tokenisation and greedy line wrapping.

use super::{Line, Measure, Piece, Word};
use crate::fonts::FontSpec;
use crate::markup::{Style, StyledRun};

/// A whitespace-delimited word before measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Same-style pieces; a word may cross run boundaries (`<b>Hel</b>lo`)
    pub pieces: Vec<StyledRun>,
    /// Style of the whitespace preceding this word
    pub gap_style: Style,
}

/// Split runs into words, carrying each piece's style.
pub fn tokenize(runs: &[StyledRun]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Vec<StyledRun> = Vec::new();
    let mut gap_style = Style::PLAIN;

    for run in runs {
        for ch in run.text.chars() {
            if ch.is_whitespace() {
                if !current.is_empty() {
                    tokens.push(Token {
                        pieces: std::mem::take(&mut current),
                        gap_style,
                    });
                }
                gap_style = run.style;
                continue;
            }
            match current.last_mut() {
                Some(piece) if piece.style == run.style => piece.text.push(ch),
                _ => current.push(StyledRun::new(ch.to_string(), run.style)),
            }
        }
    }

    if !current.is_empty() {
        tokens.push(Token {
            pieces: current,
            gap_style,
        });
    }
    tokens
}

/// Measure one token at `size`.
pub fn measure_word(measure: &dyn Measure, token: &Token, size: u32) -> Word {
    let mut offset = 0i32;
    let pieces: Vec<Piece> = token
        .pieces
        .iter()
        .map(|run| {
            let width = measure.text_width(&run.text, FontSpec::new(run.style, size));
            let piece = Piece {
                text: run.text.clone(),
                style: run.style,
                width,
                offset,
            };
            offset += width as i32;
            piece
        })
        .collect();

    Word {
        width: pieces.iter().map(|p| p.width).sum(),
        pieces,
        gap_style: token.gap_style,
        gap_width: measure.text_width(" ", FontSpec::new(token.gap_style, size)),
        x: 0,
    }
}

/// Greedy wrap: a line takes words while its natural width stays within
/// `max_width`. A word wider than `max_width` gets a line of its own.
pub fn wrap(measure: &dyn Measure, tokens: &[Token], size: u32, max_width: u32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut width = 0u32;

    for token in tokens {
        let word = measure_word(measure, token, size);
        if current.is_empty() {
            width = word.width;
            current.push(word);
        } else if width + word.gap_width + word.width <= max_width {
            width += word.gap_width + word.width;
            current.push(word);
        } else {
            lines.push(Line::unplaced(std::mem::take(&mut current), width));
            width = word.width;
            current.push(word);
        }
    }

    if !current.is_empty() {
        lines.push(Line::unplaced(current, width));
    }
    lines
}

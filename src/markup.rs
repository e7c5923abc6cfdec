//! # Inline Markup
//!
//! Parses the `<b>`, `<i>` and `<u>` tags into a flat list of styled runs.
//!
//! ```
//! use slotframe::markup::{self, Style};
//!
//! let parsed = markup::parse("<b>Hi</b> there");
//! assert_eq!(parsed.plain, "Hi there");
//! assert_eq!(parsed.runs[0].text, "Hi");
//! assert_eq!(parsed.runs[0].style, Style::BOLD);
//! assert_eq!(parsed.runs[1].text, " there");
//! ```
//!
//! Tags are case-sensitive and take no attributes. Nesting accumulates
//! styles instead of building a tree, so overlapping pairs such as
//! `<b>a<i>b</b>c</i>` are fine. A tag without a partner is kept as
//! literal text; parsing never fails.

/// Visual style flags carried by a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        bold: false,
        italic: false,
        underline: false,
    };
    pub const BOLD: Style = Style {
        bold: true,
        ..Style::PLAIN
    };
    pub const ITALIC: Style = Style {
        italic: true,
        ..Style::PLAIN
    };
    pub const UNDERLINE: Style = Style {
        underline: true,
        ..Style::PLAIN
    };

    pub fn is_plain(self) -> bool {
        self == Style::PLAIN
    }
}

/// A contiguous span of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: Style,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::PLAIN)
    }
}

/// Result of parsing: the visible text and its styled partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    /// Input with recognised tags removed
    pub plain: String,
    /// Never empty; concatenating the texts yields `plain`
    pub runs: Vec<StyledRun>,
}

impl Markup {
    /// The whole text as one unstyled run.
    pub fn verbatim(text: &str) -> Self {
        Self {
            plain: text.to_string(),
            runs: vec![StyledRun::plain(text)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Bold,
    Italic,
    Underline,
}

impl TagKind {
    fn index(self) -> usize {
        match self {
            TagKind::Bold => 0,
            TagKind::Italic => 1,
            TagKind::Underline => 2,
        }
    }
}

const TAGS: [(&str, TagKind, bool); 6] = [
    ("<b>", TagKind::Bold, false),
    ("</b>", TagKind::Bold, true),
    ("<i>", TagKind::Italic, false),
    ("</i>", TagKind::Italic, true),
    ("<u>", TagKind::Underline, false),
    ("</u>", TagKind::Underline, true),
];

#[derive(Debug)]
enum Token<'a> {
    Text(&'a str),
    Tag {
        kind: TagKind,
        closing: bool,
        raw: &'a str,
    },
}

/// True when the text contains any recognised opening or closing tag.
pub fn has_markup(text: &str) -> bool {
    TAGS.iter().any(|(tag, _, _)| text.contains(tag))
}

/// Parse markup only when tags are present (or `force` is set); otherwise
/// the text is kept verbatim, stray `<` and `>` included.
pub fn parse_auto(text: &str, force: bool) -> Markup {
    if force || has_markup(text) {
        parse(text)
    } else {
        Markup::verbatim(text)
    }
}

/// Parse `<b>`, `<i>`, `<u>` markup into styled runs.
pub fn parse(text: &str) -> Markup {
    let tokens = tokenize(text);
    let paired = pair_tags(&tokens);

    let mut depth = [0u32; 3];
    let mut runs: Vec<StyledRun> = Vec::new();

    for (token, is_paired) in tokens.iter().zip(paired) {
        let style = Style {
            bold: depth[0] > 0,
            italic: depth[1] > 0,
            underline: depth[2] > 0,
        };
        match *token {
            Token::Text(s) => push_run(&mut runs, s, style),
            Token::Tag { kind, closing, .. } if is_paired => {
                let d = &mut depth[kind.index()];
                if closing {
                    *d -= 1;
                } else {
                    *d += 1;
                }
            }
            Token::Tag { raw, .. } => push_run(&mut runs, raw, style),
        }
    }

    if runs.is_empty() {
        runs.push(StyledRun::plain(""));
    }

    let plain = runs.iter().map(|r| r.text.as_str()).collect();
    Markup { plain, runs }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('<') {
        let at = pos + offset;
        let rest = &text[at..];
        match TAGS.iter().find(|(tag, _, _)| rest.starts_with(tag)) {
            Some(&(tag, kind, closing)) => {
                if literal_start < at {
                    tokens.push(Token::Text(&text[literal_start..at]));
                }
                tokens.push(Token::Tag {
                    kind,
                    closing,
                    raw: &text[at..at + tag.len()],
                });
                pos = at + tag.len();
                literal_start = pos;
            }
            None => pos = at + 1,
        }
    }

    if literal_start < text.len() {
        tokens.push(Token::Text(&text[literal_start..]));
    }
    tokens
}

/// Mark which tag tokens have a partner. Each closing tag pairs with the
/// most recent unpaired opening tag of the same kind.
fn pair_tags(tokens: &[Token<'_>]) -> Vec<bool> {
    let mut paired = vec![false; tokens.len()];
    let mut open: [Vec<usize>; 3] = Default::default();

    for (i, token) in tokens.iter().enumerate() {
        if let Token::Tag { kind, closing, .. } = *token {
            let stack = &mut open[kind.index()];
            if !closing {
                stack.push(i);
            } else if let Some(j) = stack.pop() {
                paired[i] = true;
                paired[j] = true;
            }
        }
    }
    paired
}

fn push_run(runs: &mut Vec<StyledRun>, text: &str, style: Style) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => runs.push(StyledRun::new(text, style)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn concat(markup: &Markup) -> String {
        markup.runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_bold_then_plain() {
        let parsed = parse("<b>Hi</b> there");
        assert_eq!(
            parsed.runs,
            vec![StyledRun::new("Hi", Style::BOLD), StyledRun::plain(" there")]
        );
        assert_eq!(parsed.plain, "Hi there");
    }

    #[test]
    fn test_nesting_accumulates() {
        let parsed = parse("<b><i>x</i></b>");
        assert_eq!(
            parsed.runs,
            vec![StyledRun::new(
                "x",
                Style {
                    bold: true,
                    italic: true,
                    underline: false
                }
            )]
        );
    }

    #[test]
    fn test_overlapping_pairs() {
        let parsed = parse("<b>a<i>b</b>c</i>");
        let styles: Vec<(String, Style)> = parsed
            .runs
            .iter()
            .map(|r| (r.text.clone(), r.style))
            .collect();
        assert_eq!(
            styles,
            vec![
                ("a".to_string(), Style::BOLD),
                (
                    "b".to_string(),
                    Style {
                        bold: true,
                        italic: true,
                        underline: false
                    }
                ),
                ("c".to_string(), Style::ITALIC),
            ]
        );
        assert_eq!(parsed.plain, "abc");
    }

    #[test]
    fn test_unmatched_tags_are_literal() {
        let parsed = parse("a </b> b <i>c");
        assert_eq!(parsed.runs, vec![StyledRun::plain("a </b> b <i>c")]);

        let parsed = parse("<u>under</u> <b>dangling");
        assert_eq!(
            parsed.runs,
            vec![
                StyledRun::new("under", Style::UNDERLINE),
                StyledRun::plain(" <b>dangling"),
            ]
        );
    }

    #[test]
    fn test_tag_free_input_is_verbatim() {
        for text in ["", "plain", "1 < 2 > 0", "<B>upper</B>", "<br> <bold>", "日本語 <x>"] {
            let parsed = parse(text);
            assert_eq!(parsed.runs, vec![StyledRun::plain(text)], "{:?}", text);
            assert_eq!(parsed.plain, text);
        }
    }

    #[test]
    fn test_plain_equals_concatenated_runs() {
        for text in ["<b>a</b><b>b</b>", "<i></i>", "x<u>y<b>z</b></u>w", "<<b>>", "</i><i>"] {
            let parsed = parse(text);
            assert_eq!(concat(&parsed), parsed.plain, "{:?}", text);
            assert!(!parsed.runs.is_empty());
        }
    }

    #[test]
    fn test_adjacent_same_style_runs_merge() {
        let parsed = parse("<b>a</b><b>b</b>");
        assert_eq!(parsed.runs, vec![StyledRun::new("ab", Style::BOLD)]);
    }

    #[test]
    fn test_auto_detection() {
        assert!(has_markup("say <i>hi</i>"));
        assert!(has_markup("stray </u>"));
        assert!(!has_markup("a <= b && c >= d"));

        let kept = parse_auto("a <b c", false);
        assert_eq!(kept, Markup::verbatim("a <b c"));

        let parsed = parse_auto("<u>x</u>", false);
        assert_eq!(parsed.runs, vec![StyledRun::new("x", Style::UNDERLINE)]);

        let forced = parse_auto("no tags", true);
        assert_eq!(forced.runs, vec![StyledRun::plain("no tags")]);
    }
}

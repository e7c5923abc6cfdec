//! Named colours, colour schemes and named font sizes.

use crate::render::color::Color;

/// Colours addressable by name in colour specs.
pub const NAMED_COLORS: [(&str, Color); 18] = [
    ("white", Color::rgb(255, 255, 255)),
    ("black", Color::rgb(0, 0, 0)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 255, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("pink", Color::rgb(255, 192, 203)),
    ("lime", Color::rgb(50, 205, 50)),
    ("navy", Color::rgb(0, 0, 128)),
    ("gray", Color::rgb(128, 128, 128)),
    ("silver", Color::rgb(192, 192, 192)),
    ("brown", Color::rgb(165, 42, 42)),
    ("gold", Color::rgb(255, 215, 0)),
    ("turquoise", Color::rgb(64, 224, 208)),
];

/// Background + text colour pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorScheme {
    #[default]
    Default,
    Blue,
    Green,
    Red,
    Light,
    Purple,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 6] = [
        ColorScheme::Default,
        ColorScheme::Blue,
        ColorScheme::Green,
        ColorScheme::Red,
        ColorScheme::Light,
        ColorScheme::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::Blue => "blue",
            ColorScheme::Green => "green",
            ColorScheme::Red => "red",
            ColorScheme::Light => "light",
            ColorScheme::Purple => "purple",
        }
    }

    pub fn by_name(name: &str) -> Option<ColorScheme> {
        Self::ALL.into_iter().find(|scheme| scheme.name() == name)
    }

    pub fn background(self) -> Color {
        match self {
            ColorScheme::Default => Color::rgb(0, 0, 0),
            ColorScheme::Blue => Color::rgb(0, 50, 100),
            ColorScheme::Green => Color::rgb(0, 80, 40),
            ColorScheme::Red => Color::rgb(100, 20, 20),
            ColorScheme::Light => Color::rgb(240, 240, 240),
            ColorScheme::Purple => Color::rgb(60, 20, 80),
        }
    }

    pub fn text(self) -> Color {
        match self {
            ColorScheme::Light => Color::rgb(20, 20, 20),
            ColorScheme::Purple => Color::rgb(255, 200, 255),
            _ => Color::WHITE,
        }
    }
}

/// Map `small`/`medium`/`large`/`xlarge` to pixel sizes.
pub fn named_font_size(name: &str) -> Option<u32> {
    match name {
        "small" => Some(18),
        "medium" => Some(24),
        "large" => Some(32),
        "xlarge" => Some(48),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_are_unique() {
        for (i, (name, _)) in NAMED_COLORS.iter().enumerate() {
            assert!(
                NAMED_COLORS[i + 1..].iter().all(|(other, _)| other != name),
                "duplicate colour name {}",
                name
            );
        }
    }

    #[test]
    fn test_scheme_lookup() {
        for scheme in ColorScheme::ALL {
            assert_eq!(ColorScheme::by_name(scheme.name()), Some(scheme));
        }
        assert_eq!(ColorScheme::by_name("sepia"), None);
        assert_eq!(ColorScheme::Light.text(), Color::rgb(20, 20, 20));
    }

    #[test]
    fn test_named_font_sizes() {
        assert_eq!(named_font_size("small"), Some(18));
        assert_eq!(named_font_size("xlarge"), Some(48));
        assert_eq!(named_font_size("huge"), None);
    }
}

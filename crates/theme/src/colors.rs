//! Style attribute definitions.

use ratatui::style::Color;
use std::collections::BTreeMap;

/// Language a token-style record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    Python,
}

impl Language {
    /// Identifier used in palette files.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            _ => Err(anyhow::anyhow!("Unknown language: {}", s)),
        }
    }
}

/// Language-agnostic editor colors.
///
/// These six attributes are what every palette overwrites as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericStyle {
    /// Editor background
    pub background: Color,
    /// Default text color
    pub foreground: Color,
    /// Background of the line holding the caret
    pub caret_line_background: Color,
    /// Visible whitespace markers
    pub whitespace_foreground: Color,
    /// Matched brace background, `None` means transparent
    pub matched_brace_background: Option<Color>,
    /// Matched brace text
    pub matched_brace_foreground: Color,
}

impl Default for GenericStyle {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0xFF, 0xFF, 0xFF),
            foreground: Color::Rgb(0x00, 0x00, 0x00),
            caret_line_background: Color::Rgb(0xE4, 0xED, 0xF8),
            whitespace_foreground: Color::Rgb(0xDD, 0xDD, 0xDD),
            matched_brace_background: Some(Color::Rgb(0xB4, 0xEE, 0xB4)),
            matched_brace_foreground: Color::Rgb(0xFF, 0x00, 0x00),
        }
    }
}

/// Token colors for one language (token name -> color).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStyles {
    colors: BTreeMap<String, Color>,
}

impl TokenStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color assigned to a token, if any.
    pub fn get(&self, token: &str) -> Option<Color> {
        self.colors.get(token).copied()
    }

    /// Assign a color to a token.
    pub fn set(&mut self, token: impl Into<String>, color: Color) {
        self.colors.insert(token.into(), color);
    }

    /// Write every entry of `other` into `self`.
    ///
    /// Tokens that `other` does not name keep their current color.
    pub fn overwrite_from(&mut self, other: &TokenStyles) {
        for (token, color) in &other.colors {
            self.colors.insert(token.clone(), *color);
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, Color)> for TokenStyles {
    fn from_iter<I: IntoIterator<Item = (K, Color)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Parse a `#RRGGBB` (or `RRGGBB`) string.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

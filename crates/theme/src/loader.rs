//! Palette loading from TOML files.

use anyhow::{anyhow, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::colors::parse_hex_color;
use crate::{GenericStyle, Language, Palette, TokenStyles};

/// Color representation in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TomlColor {
    /// `"#RRGGBB"` or a named terminal color
    Named(String),
    Rgb { rgb: [u8; 3] },
}

impl TomlColor {
    fn to_color(&self) -> Result<Color> {
        match self {
            TomlColor::Named(name) => {
                if name.starts_with('#') {
                    return parse_hex_color(name)
                        .ok_or_else(|| anyhow!("Invalid hex color: {}", name));
                }
                let color = match name.as_str() {
                    "Black" => Color::Black,
                    "Red" => Color::Red,
                    "Green" => Color::Green,
                    "Yellow" => Color::Yellow,
                    "Blue" => Color::Blue,
                    "Magenta" => Color::Magenta,
                    "Cyan" => Color::Cyan,
                    "Gray" => Color::Gray,
                    "DarkGray" => Color::DarkGray,
                    "LightRed" => Color::LightRed,
                    "LightGreen" => Color::LightGreen,
                    "LightYellow" => Color::LightYellow,
                    "LightBlue" => Color::LightBlue,
                    "LightMagenta" => Color::LightMagenta,
                    "LightCyan" => Color::LightCyan,
                    "White" => Color::White,
                    _ => return Err(anyhow!("Unknown color name: {}", name)),
                };
                Ok(color)
            }
            TomlColor::Rgb { rgb } => Ok(Color::Rgb(rgb[0], rgb[1], rgb[2])),
        }
    }
}

/// TOML generic colors section.
#[derive(Debug, Clone, Deserialize)]
struct TomlGeneric {
    background: TomlColor,
    foreground: TomlColor,
    caret_line_background: TomlColor,
    whitespace_foreground: TomlColor,
    #[serde(default)]
    matched_brace_background: Option<TomlColor>,
    matched_brace_foreground: TomlColor,
}

/// TOML palette structure.
#[derive(Debug, Clone, Deserialize)]
struct TomlPalette {
    name: String,
    generic: TomlGeneric,
    #[serde(default)]
    languages: BTreeMap<String, BTreeMap<String, TomlColor>>,
}

fn build_palette(toml_palette: TomlPalette, name: &'static str) -> Result<Palette> {
    let g = &toml_palette.generic;
    let generic = GenericStyle {
        background: g.background.to_color()?,
        foreground: g.foreground.to_color()?,
        caret_line_background: g.caret_line_background.to_color()?,
        whitespace_foreground: g.whitespace_foreground.to_color()?,
        matched_brace_background: g
            .matched_brace_background
            .as_ref()
            .map(TomlColor::to_color)
            .transpose()?,
        matched_brace_foreground: g.matched_brace_foreground.to_color()?,
    };

    let mut languages = BTreeMap::new();
    for (language, tokens) in &toml_palette.languages {
        let language: Language = language.parse()?;
        let mut styles = TokenStyles::new();
        for (token, color) in tokens {
            styles.set(token.as_str(), color.to_color()?);
        }
        languages.insert(language, styles);
    }

    Ok(Palette {
        name,
        generic,
        languages,
    })
}

/// Load palette from TOML file.
///
/// Returns the parsed palette with a leaked static name string.
pub fn load_palette(path: &Path) -> Result<Palette> {
    let content = std::fs::read_to_string(path)?;
    let toml_palette: TomlPalette = toml::from_str(&content)?;

    // Leak the name string to get 'static lifetime
    let name: &'static str = Box::leak(toml_palette.name.clone().into_boxed_str());

    build_palette(toml_palette, name)
}

/// Load palette from TOML string with a static name.
pub fn load_palette_from_str(content: &str, name: &'static str) -> Result<Palette> {
    let toml_palette: TomlPalette = toml::from_str(content)?;
    build_palette(toml_palette, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r##"
name = "minimal"

[generic]
background = "#101010"
foreground = { rgb = [200, 200, 200] }
caret_line_background = "DarkGray"
whitespace_foreground = "Gray"
matched_brace_foreground = "Yellow"

[languages.python]
keyword = "#FF0000"
"##;

    #[test]
    fn test_load_from_str() {
        let palette = load_palette_from_str(MINIMAL, "minimal").unwrap();
        assert_eq!(palette.name, "minimal");
        assert_eq!(palette.generic.background, Color::Rgb(0x10, 0x10, 0x10));
        assert_eq!(palette.generic.foreground, Color::Rgb(200, 200, 200));
        assert_eq!(palette.generic.caret_line_background, Color::DarkGray);
        assert_eq!(palette.generic.matched_brace_background, None);

        let python = palette.tokens(Language::Python).unwrap();
        assert_eq!(python.get("keyword"), Some(Color::Rgb(0xFF, 0, 0)));
        assert_eq!(python.len(), 1);
    }

    #[test]
    fn test_unknown_color_name_is_rejected() {
        let broken = MINIMAL.replace("\"Gray\"", "\"Grey-ish\"");
        assert!(load_palette_from_str(&broken, "broken").is_err());
    }

    #[test]
    fn test_load_from_file_uses_declared_name() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", MINIMAL).unwrap();

        let palette = load_palette(file.path()).unwrap();
        assert_eq!(palette.name, "minimal");
    }
}

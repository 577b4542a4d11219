//! Color palettes and style state for pyedit.
//!
//! Provides the two built-in palettes (dark and light), loading of user
//! palettes from TOML, and the style state that palettes are written into.

mod colors;
mod loader;
mod state;

pub use colors::{parse_hex_color, GenericStyle, Language, TokenStyles};
pub use loader::{load_palette, load_palette_from_str};
pub use state::{StyleHandle, StyleState};

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

// Embed palette files at compile time
const PALETTE_DARK_TOML: &str = include_str!("../themes/dark.toml");
const PALETTE_LIGHT_TOML: &str = include_str!("../themes/light.toml");

// Static palette instances
static PALETTE_DARK: OnceLock<Palette> = OnceLock::new();
static PALETTE_LIGHT: OnceLock<Palette> = OnceLock::new();

// Cache for user-loaded palettes
static USER_PALETTES: OnceLock<Mutex<HashMap<String, &'static Palette>>> = OnceLock::new();

// Themes directory path (set by app on startup)
static THEMES_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Named, immutable set of color assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Palette name for display and lookup
    pub name: &'static str,
    /// Language-agnostic colors
    pub generic: GenericStyle,
    pub(crate) languages: BTreeMap<Language, TokenStyles>,
}

impl Palette {
    /// Token colors this palette defines for a language.
    pub fn tokens(&self, language: Language) -> Option<&TokenStyles> {
        self.languages.get(&language)
    }

    /// Built-in dark palette.
    pub fn dark() -> &'static Palette {
        PALETTE_DARK.get_or_init(|| load_palette_from_toml(PALETTE_DARK_TOML, "dark"))
    }

    /// Built-in light palette.
    pub fn light() -> &'static Palette {
        PALETTE_LIGHT.get_or_init(|| load_palette_from_toml(PALETTE_LIGHT_TOML, "light"))
    }

    /// Find a palette by name.
    ///
    /// A file `<name>.toml` in the themes directory takes precedence over the
    /// built-in palettes. Returns `None` for names that match neither.
    pub fn find(name: &str) -> Option<&'static Palette> {
        if let Some(palette) = try_load_user_palette(name) {
            return Some(palette);
        }

        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}

/// Set the themes directory path (call this at app startup).
pub fn set_themes_dir(path: PathBuf) {
    let _ = THEMES_DIR.set(path);
}

fn get_themes_dir() -> Option<&'static PathBuf> {
    THEMES_DIR.get()
}

/// Hardcoded fallback palette in case of parse errors.
fn get_hardcoded_fallback_palette(name: &'static str) -> Palette {
    Palette {
        name,
        generic: GenericStyle::default(),
        languages: BTreeMap::new(),
    }
}

/// Load palette from embedded TOML content.
fn load_palette_from_toml(content: &str, name: &'static str) -> Palette {
    match loader::load_palette_from_str(content, name) {
        Ok(palette) => palette,
        Err(e) => {
            eprintln!(
                "Failed to parse built-in palette '{}': {}. Using fallback palette.",
                name, e
            );
            get_hardcoded_fallback_palette(name)
        }
    }
}

/// Try to load user palette from config directory.
fn try_load_user_palette(name: &str) -> Option<&'static Palette> {
    let cache = USER_PALETTES.get_or_init(|| Mutex::new(HashMap::new()));

    // Use ok() to gracefully handle poisoned mutex (return None instead of panicking)
    {
        let cache_lock = cache.lock().ok()?;
        if let Some(palette) = cache_lock.get(name) {
            return Some(*palette);
        }
    }

    let themes_dir = get_themes_dir()?;
    let palette_path = themes_dir.join(format!("{}.toml", name));

    if !palette_path.exists() {
        return None;
    }

    let palette = match load_palette(&palette_path) {
        Ok(palette) => palette,
        Err(e) => {
            eprintln!("Failed to load palette '{}': {}", palette_path.display(), e);
            return None;
        }
    };

    // Leak the palette to get 'static reference
    let static_palette: &'static Palette = Box::leak(Box::new(palette));

    if let Ok(mut cache_lock) = cache.lock() {
        cache_lock.insert(name.to_string(), static_palette);
    }

    Some(static_palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_builtin_dark_constants() {
        let dark = Palette::dark();
        assert_eq!(dark.name, "dark");
        assert_eq!(dark.generic.background, Color::Rgb(0x25, 0x25, 0x25));
        assert_eq!(dark.generic.foreground, Color::Rgb(0xA9, 0xB7, 0xC6));
        assert_eq!(dark.generic.caret_line_background, Color::Rgb(0x2D, 0x2D, 0x2D));
        assert_eq!(dark.generic.whitespace_foreground, Color::Rgb(0x40, 0x40, 0x40));
        assert_eq!(dark.generic.matched_brace_background, None);
        assert_eq!(dark.generic.matched_brace_foreground, Color::Rgb(0xFF, 0x86, 0x47));
    }

    #[test]
    fn test_builtin_light_constants() {
        let light = Palette::light();
        assert_eq!(light.name, "light");
        assert_eq!(light.generic, GenericStyle::default());
        assert_eq!(
            light.generic.matched_brace_background,
            Some(Color::Rgb(0xB4, 0xEE, 0xB4))
        );
    }

    #[test]
    fn test_builtins_share_python_token_keys() {
        let dark: Vec<_> = Palette::dark()
            .tokens(Language::Python)
            .unwrap()
            .iter()
            .map(|(k, _)| k)
            .collect();
        let light: Vec<_> = Palette::light()
            .tokens(Language::Python)
            .unwrap()
            .iter()
            .map(|(k, _)| k)
            .collect();
        assert!(!dark.is_empty());
        assert_eq!(dark, light);
    }

    #[test]
    fn test_palette_lookup() {
        assert_eq!(Palette::find("light").map(|p| p.name), Some("light"));
        assert_eq!(Palette::find("dark").map(|p| p.name), Some("dark"));
        assert!(Palette::find("nonexistent").is_none());
    }
}

//! Mutable style state consulted at render time.

use anyhow::{anyhow, Result};
use ratatui::style::Color;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::{GenericStyle, Language, Palette, TokenStyles};

/// Currently active color attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleState {
    /// Language-agnostic attributes
    pub generic: GenericStyle,
    languages: BTreeMap<Language, TokenStyles>,
}

impl StyleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token colors for a language, if any were ever written.
    pub fn tokens(&self, language: Language) -> Option<&TokenStyles> {
        self.languages.get(&language)
    }

    pub fn token_color(&self, language: Language, token: &str) -> Option<Color> {
        self.tokens(language).and_then(|t| t.get(token))
    }

    pub fn set_token_color(&mut self, language: Language, token: &str, color: Color) {
        self.languages.entry(language).or_default().set(token, color);
    }

    /// Write a palette into this state.
    ///
    /// Generic attributes are replaced as a whole. Token colors are written
    /// key by key: tokens the palette does not name keep their value.
    pub fn apply_palette(&mut self, palette: &Palette) {
        self.generic = palette.generic;
        for (language, tokens) in &palette.languages {
            self.languages
                .entry(*language)
                .or_default()
                .overwrite_from(tokens);
        }
    }
}

/// Shared reference to a style state.
///
/// Each editor host holds one. Clones point at the same state.
#[derive(Debug, Clone, Default)]
pub struct StyleHandle {
    inner: Arc<Mutex<StyleState>>,
}

/// Process-wide default state (opt-in)
static SHARED_STYLE: OnceLock<StyleHandle> = OnceLock::new();

impl StyleHandle {
    /// New, isolated style state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the process-wide shared style state.
    ///
    /// Every host built on this handle sees theme changes made through any other.
    pub fn shared() -> Self {
        SHARED_STYLE.get_or_init(StyleHandle::new).clone()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<StyleState> {
        self.with(|state| state.clone())
    }

    /// Run `f` with read access.
    pub fn with<R>(&self, f: impl FnOnce(&StyleState) -> R) -> Result<R> {
        let state = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Style state lock poisoned"))?;
        Ok(f(&state))
    }

    /// Run `f` with write access.
    pub fn update<R>(&self, f: impl FnOnce(&mut StyleState) -> R) -> Result<R> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Style state lock poisoned"))?;
        Ok(f(&mut state))
    }

    /// True if both handles refer to the same state.
    pub fn same_state(&self, other: &StyleHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let a = StyleHandle::new();
        let b = a.clone();
        a.update(|s| s.set_token_color(Language::Python, "keyword", Color::Red))
            .unwrap();

        assert!(a.same_state(&b));
        assert_eq!(
            b.snapshot().unwrap().token_color(Language::Python, "keyword"),
            Some(Color::Red)
        );
    }

    #[test]
    fn test_new_handles_are_isolated() {
        let a = StyleHandle::new();
        let b = StyleHandle::new();
        a.update(|s| s.generic.background = Color::Black).unwrap();

        assert!(!a.same_state(&b));
        assert_eq!(b.snapshot().unwrap().generic, GenericStyle::default());
    }

    #[test]
    fn test_shared_returns_same_state() {
        assert!(StyleHandle::shared().same_state(&StyleHandle::shared()));
    }

    #[test]
    fn test_apply_palette_keeps_tokens_outside_palette() {
        let mut state = StyleState::new();
        state.set_token_color(Language::Python, "custom-token", Color::Magenta);

        let palette = Palette::dark();
        state.apply_palette(palette);

        assert_eq!(state.generic, palette.generic);
        assert_eq!(
            state.token_color(Language::Python, "custom-token"),
            Some(Color::Magenta)
        );
        assert_eq!(
            state.token_color(Language::Python, "keyword"),
            palette.tokens(Language::Python).and_then(|t| t.get("keyword"))
        );
    }
}

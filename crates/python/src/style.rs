//! Dark and light color schemes for the Python editor.
//!
//! Applying a scheme writes a palette into the host's style state and asks
//! the host to redraw. Hosts built on `StyleHandle::shared()` all see the
//! change; hosts with their own handle are unaffected.

use anyhow::Result;
use pyedit_core::EditorHost;
use pyedit_theme::Palette;

/// Write `palette` into the host's style state and refresh the host.
///
/// The six generic attributes are replaced. Token colors the palette names
/// are overwritten, any other token keeps its color.
pub fn apply_palette<H: EditorHost + ?Sized>(host: &mut H, palette: &Palette) -> Result<()> {
    host.style().update(|state| state.apply_palette(palette))?;
    log::info!("Color scheme changed to {}", palette.name);
    host.refresh_style();
    Ok(())
}

/// Dark scheme, close to PyCharm's Darcula.
pub fn apply_dark<H: EditorHost + ?Sized>(host: &mut H) -> Result<()> {
    apply_palette(host, Palette::dark())
}

/// Light scheme, close to Qt Creator's default.
pub fn apply_light<H: EditorHost + ?Sized>(host: &mut H) -> Result<()> {
    apply_palette(host, Palette::light())
}

/// Apply a palette by name (built-in or from the themes directory).
pub fn apply_named<H: EditorHost + ?Sized>(host: &mut H, name: &str) -> Result<()> {
    let palette = Palette::find(name).unwrap_or_else(|| {
        let fallback = Palette::dark();
        log::warn!("Unknown color scheme '{}', using {}", name, fallback.name);
        fallback
    });
    apply_palette(host, palette)
}

/// Handler for a checkable "dark scheme" action.
///
/// Only the checked transition applies the scheme; unchecking does nothing.
pub fn on_dark_toggled<H: EditorHost + ?Sized>(host: &mut H, checked: bool) -> Result<()> {
    if !checked {
        return Ok(());
    }
    apply_dark(host)
}

/// Handler for a checkable "light scheme" action.
///
/// Only the checked transition applies the scheme; unchecking does nothing.
pub fn on_light_toggled<H: EditorHost + ?Sized>(host: &mut H, checked: bool) -> Result<()> {
    if !checked {
        return Ok(());
    }
    apply_light(host)
}

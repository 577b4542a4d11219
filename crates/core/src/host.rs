//! Contract an editor widget offers to extension code.

use anyhow::Result;
use pyedit_theme::StyleHandle;

use crate::{Component, DockPosition, TextDocument};

/// Editor host onto which modes and panels are installed.
///
/// The host owns installed components for its lifetime and detaches them
/// when it is destroyed.
pub trait EditorHost {
    /// Install a mode. The host calls `attach` on it.
    fn install_mode(&mut self, mode: Box<dyn Component>) -> Result<()>;

    /// Install a panel docked to `dock`. The host calls `attach` on it.
    fn install_panel(&mut self, panel: Box<dyn Component>, dock: DockPosition) -> Result<()>;

    /// True if a component with this name is installed.
    fn is_installed(&self, name: &str) -> bool;

    /// Re-apply colors from the style state and redraw.
    fn refresh_style(&mut self);

    /// The host's text document.
    fn document(&self) -> TextDocument;

    /// The style state this host renders with.
    fn style(&self) -> &StyleHandle;

    fn set_word_wrap(&mut self, enabled: bool);

    fn set_window_title(&mut self, title: &str);
}

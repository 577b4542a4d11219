//! Assembles the Python editor out of modes and panels.
//!
//! Installation order matters: components query the ones installed before
//! them, so every component's declared dependencies must already be on the
//! host when its turn comes.

use anyhow::{bail, Result};
use pyedit_config::EditorSettings;
use pyedit_core::{Component, DockPosition, EditorHost, TextDocument};

use crate::components::{Mode, ModeKind, Panel, PanelKind};

/// Settings the Python preset is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerSettings {
    pub right_margin: usize,
    pub tab_size: usize,
    pub pep8_max_line_length: usize,
    pub window_title: String,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self::from(&EditorSettings::default())
    }
}

impl From<&EditorSettings> for ComposerSettings {
    fn from(settings: &EditorSettings) -> Self {
        Self {
            right_margin: settings.right_margin,
            tab_size: settings.tab_size,
            pep8_max_line_length: settings.pep8_max_line_length,
            window_title: settings.window_title.clone(),
        }
    }
}

/// One step of a composition.
pub enum Install {
    Mode(Box<dyn Component>),
    Panel(Box<dyn Component>, DockPosition),
}

impl Install {
    fn mode(kind: ModeKind) -> Self {
        Install::Mode(Box::new(Mode::new(kind)))
    }

    fn panel(kind: PanelKind) -> Self {
        Install::Panel(Box::new(Panel::new(kind)), kind.dock())
    }

    pub fn component(&self) -> &dyn Component {
        match self {
            Install::Mode(c) | Install::Panel(c, _) => c.as_ref(),
        }
    }
}

/// The Python editor's components, in installation order.
///
/// `document` is the host document the highlighter is bound to.
pub fn python_preset(document: TextDocument, settings: &ComposerSettings) -> Vec<Install> {
    vec![
        // Queried by the symbol browser, completion, calltips and navigation
        Install::mode(ModeKind::DocumentAnalyser),
        // Panels
        Install::panel(PanelKind::LineNumber),
        Install::panel(PanelKind::Marker),
        Install::panel(PanelKind::SearchAndReplace),
        Install::panel(PanelKind::SymbolBrowser),
        // Generic modes
        Install::mode(ModeKind::CaretLineHighlighter),
        Install::mode(ModeKind::FileWatcher),
        Install::mode(ModeKind::RightMargin {
            column: settings.right_margin,
        }),
        Install::mode(ModeKind::Zoom),
        Install::mode(ModeKind::SymbolMatcher),
        Install::mode(ModeKind::WordClick),
        Install::mode(ModeKind::CodeCompletion),
        // Python modes
        Install::mode(ModeKind::PythonHighlighter { document }),
        Install::mode(ModeKind::PythonAutoComplete),
        Install::mode(ModeKind::PythonAutoIndent),
        Install::mode(ModeKind::PyflakesChecker),
        Install::mode(ModeKind::Pep8Checker {
            max_line_length: settings.pep8_max_line_length,
        }),
        Install::mode(ModeKind::Calltips),
        Install::mode(ModeKind::PythonIndenter {
            tab_size: settings.tab_size,
        }),
        Install::mode(ModeKind::GoToAssignments),
        Install::panel(PanelKind::QuickDoc),
        Install::mode(ModeKind::Comments),
    ]
}

/// Install components in order, checking declared dependencies first.
///
/// Stops at the first unmet dependency or host error.
pub fn install_all<H: EditorHost + ?Sized>(host: &mut H, installs: Vec<Install>) -> Result<()> {
    for install in installs {
        let component = install.component();
        let name = component.name();
        if let Some(missing) = component.requires().iter().find(|dep| !host.is_installed(dep)) {
            bail!("{} requires {}, which is not installed", name, missing);
        }

        match install {
            Install::Mode(mode) => host.install_mode(mode)?,
            Install::Panel(panel, dock) => host.install_panel(panel, dock)?,
        }
        log::debug!("Installed {}", name);
    }
    Ok(())
}

/// Turn a fresh host into a Python editor.
///
/// Must run once per host, before anything else is installed on it.
/// Calling it twice installs every component twice, which hosts are free
/// to reject.
pub fn compose<H: EditorHost + ?Sized>(host: &mut H, settings: &ComposerSettings) -> Result<()> {
    host.set_word_wrap(false);
    host.set_window_title(&settings.window_title);

    let installs = python_preset(host.document(), settings);
    let count = installs.len();
    install_all(host, installs)?;

    log::info!("Python editor composed with {} components", count);
    Ok(())
}

/// Compose with default settings.
pub fn compose_default<H: EditorHost + ?Sized>(host: &mut H) -> Result<()> {
    compose(host, &ComposerSettings::default())
}

//! Python modes, panels and color schemes for pyedit.
//!
//! Composes an editor host into a Python code editor, switches it between
//! a dark and a light color scheme, and detects the declared encoding of
//! Python sources.

pub mod components;
pub mod composer;
pub mod editor;
pub mod style;

#[cfg(test)]
mod testing;

pub use components::{names, Mode, ModeKind, Panel, PanelKind};
pub use composer::{compose, compose_default, install_all, python_preset, ComposerSettings, Install};
pub use editor::{LoadTarget, PythonEditor};
pub use style::{apply_dark, apply_light, apply_named, apply_palette, on_dark_toggled, on_light_toggled};

// Re-export encoding detection for convenience
pub use pyedit_encoding::{detect_encoding, EncodingDetector, ScanMode};

//! Python code editor built on any editor host.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use pyedit_config::Config;
use pyedit_core::{EditorEvent, EditorHost};
use pyedit_encoding::{EncodingDetector, ScanMode};

use crate::composer::{compose, ComposerSettings};
use crate::style;

/// An editor host composed with the Python modes and panels.
///
/// Encoding detection follows PEP 263 declarations. Without one, the
/// configured fallback (UTF-8 by default) is reported.
pub struct PythonEditor<H: EditorHost> {
    host: H,
    detector: EncodingDetector,
}

impl<H: EditorHost> PythonEditor<H> {
    /// Compose `host` with default settings.
    pub fn new(host: H) -> Result<Self> {
        Self::with_config(host, &Config::default())
    }

    /// Compose `host` with the editor and encoding settings of `config`.
    pub fn with_config(mut host: H, config: &Config) -> Result<Self> {
        compose(&mut host, &ComposerSettings::from(&config.editor))?;
        Ok(Self {
            host,
            detector: detector_from_config(config),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn use_dark_style(&mut self) -> Result<()> {
        style::apply_dark(&mut self.host)
    }

    pub fn use_light_style(&mut self) -> Result<()> {
        style::apply_light(&mut self.host)
    }

    /// Apply a color scheme by name.
    pub fn use_style(&mut self, name: &str) -> Result<()> {
        style::apply_named(&mut self.host, name)
    }

    /// Declared encoding of raw file content.
    pub fn detect_encoding(&self, data: &[u8]) -> String {
        self.detector.detect(data)
    }

    pub fn encoding_detector(&self) -> &EncodingDetector {
        &self.detector
    }

    /// Load a file into the host document.
    ///
    /// The content is decoded with the declared encoding and the encoding
    /// label is returned. Labels unknown to the WHATWG encoding registry fall
    /// back to UTF-8.
    pub fn load_file(&mut self, path: &Path) -> Result<String>
    where
        H: LoadTarget,
    {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let encoding = self.detector.detect(&data);
        let text = decode(&data, &encoding);
        if text.had_errors {
            log::warn!(
                "{} has bytes invalid in {}, replaced them",
                path.display(),
                text.used
            );
        }

        self.host.load_text(&text.content);
        self.host.notify(&EditorEvent::FileOpened {
            path: path.to_path_buf(),
            encoding: encoding.clone(),
        });
        log::info!("Opened {} ({})", path.display(), encoding);
        Ok(encoding)
    }
}

/// Hosts whose document can be replaced and whose components can be notified.
pub trait LoadTarget {
    fn load_text(&mut self, text: &str);
    fn notify(&mut self, event: &EditorEvent);
}

impl LoadTarget for pyedit_core::HeadlessEditor {
    fn load_text(&mut self, text: &str) {
        self.set_text(text);
    }

    fn notify(&mut self, event: &EditorEvent) {
        self.broadcast(event);
    }
}

fn detector_from_config(config: &Config) -> EncodingDetector {
    let scan = config
        .encoding
        .scan
        .parse::<ScanMode>()
        .unwrap_or_else(|e| {
            log::warn!("{}, scanning the whole file", e);
            ScanMode::default()
        });
    EncodingDetector::new(config.encoding.fallback.clone(), scan)
}

/// Decoded file content.
struct Decoded {
    content: String,
    /// Name of the decoder actually used
    used: &'static str,
    had_errors: bool,
}

/// Resolve a declared label, also trying the `latin-1`/`utf_8` spellings
/// Python accepts.
fn lookup_encoding(label: &str) -> Option<&'static Encoding> {
    let compact: String = label.chars().filter(|c| !matches!(c, '-' | '_')).collect();
    [label.to_string(), label.replace('_', "-"), compact]
        .iter()
        .find_map(|candidate| Encoding::for_label(candidate.as_bytes()))
}

fn decode(data: &[u8], label: &str) -> Decoded {
    let label = label.trim();
    let encoding = lookup_encoding(label).unwrap_or_else(|| {
        log::warn!("Unknown encoding '{}', decoding as UTF-8", label);
        UTF_8
    });
    let (content, used, had_errors) = encoding.decode(data);
    Decoded {
        content: content.into_owned(),
        used: used.name(),
        had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{names, Mode, ModeKind};
    use pyedit_core::{Component, DockPosition, HeadlessEditor};
    use pyedit_theme::Palette;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_new_composes_host() {
        let editor = PythonEditor::new(HeadlessEditor::new()).unwrap();
        let host = editor.host();

        assert_eq!(host.installed()[0], names::DOCUMENT_ANALYSER);
        assert_eq!(host.panels_at(DockPosition::Top), vec![names::SYMBOL_BROWSER_PANEL]);
        assert!(!host.word_wrap());
        assert_eq!(host.window_title(), "pyedit - Python Editor");
    }

    #[test]
    fn test_styles_switch() {
        let mut editor = PythonEditor::new(HeadlessEditor::new()).unwrap();
        editor.use_dark_style().unwrap();
        editor.use_light_style().unwrap();

        let state = editor.host().style().snapshot().unwrap();
        assert_eq!(state.generic, Palette::light().generic);
        assert_eq!(editor.host().style_refreshes(), 2);

        let highlighter = editor
            .host()
            .component(names::PYTHON_HIGHLIGHTER)
            .and_then(|c| c.as_any().downcast_ref::<Mode>())
            .unwrap();
        assert!(matches!(highlighter.mode_kind(), ModeKind::PythonHighlighter { .. }));
        assert_eq!(highlighter.style_refreshes(), 2);
    }

    #[test]
    fn test_config_drives_detector() {
        let mut config = Config::default();
        config.encoding.fallback = "cp1252".to_string();
        config.encoding.scan = "pep263".to_string();
        let editor = PythonEditor::with_config(HeadlessEditor::new(), &config).unwrap();

        assert_eq!(editor.encoding_detector().scan_mode(), ScanMode::Pep263);
        assert_eq!(editor.detect_encoding(b"x = 1\n"), "cp1252");
        assert_eq!(
            editor.detect_encoding(b"\n\n# coding: latin-1\n"),
            "cp1252"
        );
    }

    #[test]
    fn test_bad_scan_mode_falls_back() {
        let mut config = Config::default();
        config.encoding.scan = "whenever".to_string();
        let editor = PythonEditor::with_config(HeadlessEditor::new(), &config).unwrap();
        assert_eq!(editor.encoding_detector().scan_mode(), ScanMode::WholeFile);
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# -*- coding: utf-8 -*-").unwrap();
        writeln!(file, "print(1)").unwrap();

        let mut editor = PythonEditor::new(HeadlessEditor::new()).unwrap();
        let encoding = editor.load_file(file.path()).unwrap();

        assert_eq!(encoding, "utf-8");
        assert_eq!(
            editor.host().document().text(),
            "# -*- coding: utf-8 -*-\nprint(1)\n"
        );
        assert!(editor.load_file(Path::new("/nonexistent/x.py")).is_err());
    }

    #[test]
    fn test_load_file_decodes_declared_encoding() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"# -*- coding: latin-1 -*-\nname = '\xe9t\xe9'\n")
            .unwrap();

        let mut editor = PythonEditor::new(HeadlessEditor::new()).unwrap();
        let encoding = editor.load_file(file.path()).unwrap();

        assert_eq!(encoding, "latin-1");
        let text = editor.host().document().text();
        assert!(text.contains("name = 'été'"), "{:?}", text);
    }

    #[test]
    fn test_decode_labels() {
        assert_eq!(decode(b"caf\xc3\xa9", "UTF-8").content, "café");
        assert_eq!(decode(b"caf\xc3\xa9", "utf_8").content, "café");
        assert_eq!(decode(b"\xc0\xc1", "koi8-r").content, "юа");
        assert_eq!(decode(b"\xe9", "latin-1").content, "é");

        // Unknown labels decode as UTF-8
        let decoded = decode(b"x = '\xff'", "no-such-codec");
        assert_eq!(decoded.used, "UTF-8");
        assert!(decoded.had_errors);
        assert_eq!(decoded.content, "x = '\u{FFFD}'");
    }
}

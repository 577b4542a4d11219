//! Modes and panels installed by the Python editor.
//!
//! Each component is a handle onto behavior the host framework provides
//! (highlighting, completion, linting, drawing). What lives here is the
//! identity of each component, its settings, its declared dependencies and
//! its attach/detach bookkeeping.

use std::any::Any;

use pyedit_core::{
    AttachContext, Component, ComponentKind, DockPosition, EditorEvent, EditorId, TextDocument,
};

/// Component names, as used in dependency declarations.
pub mod names {
    pub const DOCUMENT_ANALYSER: &str = "document-analyser";
    pub const CARET_LINE_HIGHLIGHTER: &str = "caret-line-highlighter";
    pub const FILE_WATCHER: &str = "file-watcher";
    pub const RIGHT_MARGIN: &str = "right-margin";
    pub const ZOOM: &str = "zoom";
    pub const SYMBOL_MATCHER: &str = "symbol-matcher";
    pub const WORD_CLICK: &str = "word-click";
    pub const CODE_COMPLETION: &str = "code-completion";
    pub const PYTHON_HIGHLIGHTER: &str = "python-highlighter";
    pub const PYTHON_AUTO_COMPLETE: &str = "python-auto-complete";
    pub const PYTHON_AUTO_INDENT: &str = "python-auto-indent";
    pub const PYFLAKES_CHECKER: &str = "pyflakes-checker";
    pub const PEP8_CHECKER: &str = "pep8-checker";
    pub const CALLTIPS: &str = "calltips";
    pub const PYTHON_INDENTER: &str = "python-indenter";
    pub const GO_TO_ASSIGNMENTS: &str = "go-to-assignments";
    pub const COMMENTS: &str = "comments";

    pub const LINE_NUMBER_PANEL: &str = "line-number-panel";
    pub const MARKER_PANEL: &str = "marker-panel";
    pub const SEARCH_AND_REPLACE_PANEL: &str = "search-and-replace-panel";
    pub const SYMBOL_BROWSER_PANEL: &str = "symbol-browser-panel";
    pub const QUICK_DOC_PANEL: &str = "quick-doc-panel";
}

use names::*;

/// Every mode the Python editor knows about.
#[derive(Debug, Clone)]
pub enum ModeKind {
    /// Parses the document into symbols other components query
    DocumentAnalyser,
    CaretLineHighlighter,
    /// Reloads the document when the file changes on disk
    FileWatcher,
    RightMargin {
        column: usize,
    },
    Zoom,
    /// Highlights matching brackets
    SymbolMatcher,
    WordClick,
    CodeCompletion,
    /// Syntax highlighter bound to one text document
    PythonHighlighter {
        document: TextDocument,
    },
    PythonAutoComplete,
    PythonAutoIndent,
    /// Static analysis (pyflakes)
    PyflakesChecker,
    /// Style checker (PEP 8)
    Pep8Checker {
        max_line_length: usize,
    },
    Calltips,
    PythonIndenter {
        tab_size: usize,
    },
    GoToAssignments,
    Comments,
}

impl ModeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ModeKind::DocumentAnalyser => DOCUMENT_ANALYSER,
            ModeKind::CaretLineHighlighter => CARET_LINE_HIGHLIGHTER,
            ModeKind::FileWatcher => FILE_WATCHER,
            ModeKind::RightMargin { .. } => RIGHT_MARGIN,
            ModeKind::Zoom => ZOOM,
            ModeKind::SymbolMatcher => SYMBOL_MATCHER,
            ModeKind::WordClick => WORD_CLICK,
            ModeKind::CodeCompletion => CODE_COMPLETION,
            ModeKind::PythonHighlighter { .. } => PYTHON_HIGHLIGHTER,
            ModeKind::PythonAutoComplete => PYTHON_AUTO_COMPLETE,
            ModeKind::PythonAutoIndent => PYTHON_AUTO_INDENT,
            ModeKind::PyflakesChecker => PYFLAKES_CHECKER,
            ModeKind::Pep8Checker { .. } => PEP8_CHECKER,
            ModeKind::Calltips => CALLTIPS,
            ModeKind::PythonIndenter { .. } => PYTHON_INDENTER,
            ModeKind::GoToAssignments => GO_TO_ASSIGNMENTS,
            ModeKind::Comments => COMMENTS,
        }
    }

    pub fn requires(&self) -> &'static [&'static str] {
        match self {
            ModeKind::CodeCompletion | ModeKind::Calltips => &[DOCUMENT_ANALYSER],
            ModeKind::PythonAutoComplete => &[CODE_COMPLETION],
            ModeKind::GoToAssignments => &[DOCUMENT_ANALYSER, WORD_CLICK],
            _ => &[],
        }
    }

    /// Modes that react to document edits.
    fn tracks_content(&self) -> bool {
        matches!(
            self,
            ModeKind::DocumentAnalyser
                | ModeKind::PythonHighlighter { .. }
                | ModeKind::PyflakesChecker
                | ModeKind::Pep8Checker { .. }
        )
    }

    /// Modes that draw with style colors.
    fn uses_style(&self) -> bool {
        matches!(
            self,
            ModeKind::CaretLineHighlighter
                | ModeKind::RightMargin { .. }
                | ModeKind::SymbolMatcher
                | ModeKind::PythonHighlighter { .. }
        )
    }
}

/// An editor mode.
#[derive(Debug)]
pub struct Mode {
    kind: ModeKind,
    attachment: Option<AttachContext>,
    /// Last document revision this mode was told about
    seen_revision: Option<u64>,
    style_refreshes: usize,
}

impl Mode {
    pub fn new(kind: ModeKind) -> Self {
        Self {
            kind,
            attachment: None,
            seen_revision: None,
            style_refreshes: 0,
        }
    }

    pub fn mode_kind(&self) -> &ModeKind {
        &self.kind
    }

    pub fn seen_revision(&self) -> Option<u64> {
        self.seen_revision
    }

    /// Number of style refreshes received while attached.
    pub fn style_refreshes(&self) -> usize {
        self.style_refreshes
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }
}

impl Component for Mode {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Mode
    }

    fn requires(&self) -> &'static [&'static str] {
        self.kind.requires()
    }

    fn attach(&mut self, ctx: &AttachContext) {
        if let ModeKind::PythonHighlighter { document } = &self.kind {
            if !document.same_document(&ctx.document) {
                log::warn!(
                    "{} on {} was built for another document",
                    PYTHON_HIGHLIGHTER,
                    ctx.editor
                );
            }
        }
        if self.kind.tracks_content() {
            self.seen_revision = Some(ctx.document.revision());
        }
        self.attachment = Some(ctx.clone());
    }

    fn detach(&mut self) {
        self.attachment = None;
    }

    fn attached_to(&self) -> Option<EditorId> {
        self.attachment.as_ref().map(|a| a.editor)
    }

    fn on_event(&mut self, event: &EditorEvent) {
        if self.attachment.is_none() {
            return;
        }
        match event {
            EditorEvent::TextChanged { revision } if self.kind.tracks_content() => {
                self.seen_revision = Some(*revision);
            }
            EditorEvent::StyleRefreshed if self.kind.uses_style() => {
                self.style_refreshes += 1;
            }
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Every panel the Python editor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    LineNumber,
    /// Gutter markers (breakpoints, checker messages)
    Marker,
    SearchAndReplace,
    /// Outline of the document's classes and functions
    SymbolBrowser,
    /// Documentation of the symbol under the caret
    QuickDoc,
}

impl PanelKind {
    pub fn name(self) -> &'static str {
        match self {
            PanelKind::LineNumber => LINE_NUMBER_PANEL,
            PanelKind::Marker => MARKER_PANEL,
            PanelKind::SearchAndReplace => SEARCH_AND_REPLACE_PANEL,
            PanelKind::SymbolBrowser => SYMBOL_BROWSER_PANEL,
            PanelKind::QuickDoc => QUICK_DOC_PANEL,
        }
    }

    pub fn requires(self) -> &'static [&'static str] {
        match self {
            PanelKind::SymbolBrowser | PanelKind::QuickDoc => &[DOCUMENT_ANALYSER],
            _ => &[],
        }
    }

    /// Edge the panel docks to in the Python editor.
    pub fn dock(self) -> DockPosition {
        match self {
            PanelKind::SearchAndReplace | PanelKind::QuickDoc => DockPosition::Bottom,
            PanelKind::SymbolBrowser => DockPosition::Top,
            PanelKind::LineNumber | PanelKind::Marker => DockPosition::Left,
        }
    }
}

/// An editor panel.
#[derive(Debug)]
pub struct Panel {
    kind: PanelKind,
    attachment: Option<AttachContext>,
}

impl Panel {
    pub fn new(kind: PanelKind) -> Self {
        Self {
            kind,
            attachment: None,
        }
    }

    pub fn panel_kind(&self) -> PanelKind {
        self.kind
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }
}

impl Component for Panel {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Panel
    }

    fn requires(&self) -> &'static [&'static str] {
        self.kind.requires()
    }

    fn attach(&mut self, ctx: &AttachContext) {
        self.attachment = Some(ctx.clone());
    }

    fn detach(&mut self) {
        self.attachment = None;
    }

    fn attached_to(&self) -> Option<EditorId> {
        self.attachment.as_ref().map(|a| a.editor)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyedit_core::StyleHandle;

    fn context(document: &TextDocument) -> AttachContext {
        AttachContext {
            editor: EditorId::next(),
            document: document.clone(),
            style: StyleHandle::new(),
        }
    }

    #[test]
    fn test_mode_attach_detach() {
        let document = TextDocument::from_text("x = 1");
        let ctx = context(&document);
        let mut mode = Mode::new(ModeKind::DocumentAnalyser);

        mode.attach(&ctx);
        assert_eq!(mode.attached_to(), Some(ctx.editor));
        assert_eq!(mode.seen_revision(), Some(1));

        mode.detach();
        assert!(!mode.is_attached());
        assert_eq!(mode.attached_to(), None);
    }

    #[test]
    fn test_content_tracking_modes_follow_edits() {
        let document = TextDocument::new();
        let ctx = context(&document);
        let mut checker = Mode::new(ModeKind::Pep8Checker { max_line_length: 79 });
        let mut zoom = Mode::new(ModeKind::Zoom);
        checker.attach(&ctx);
        zoom.attach(&ctx);

        let event = EditorEvent::TextChanged { revision: 7 };
        checker.on_event(&event);
        zoom.on_event(&event);

        assert_eq!(checker.seen_revision(), Some(7));
        assert_eq!(zoom.seen_revision(), None);
    }

    #[test]
    fn test_detached_mode_ignores_events() {
        let mut highlighter = Mode::new(ModeKind::PythonHighlighter {
            document: TextDocument::new(),
        });
        highlighter.on_event(&EditorEvent::StyleRefreshed);
        assert_eq!(highlighter.style_refreshes(), 0);
    }

    #[test]
    fn test_declared_dependencies() {
        assert_eq!(
            Mode::new(ModeKind::GoToAssignments).requires(),
            &[DOCUMENT_ANALYSER, WORD_CLICK]
        );
        assert!(Mode::new(ModeKind::DocumentAnalyser).requires().is_empty());
        assert_eq!(
            Panel::new(PanelKind::SymbolBrowser).requires(),
            &[DOCUMENT_ANALYSER]
        );
    }

    #[test]
    fn test_panel_docks() {
        assert_eq!(PanelKind::SearchAndReplace.dock(), DockPosition::Bottom);
        assert_eq!(PanelKind::SymbolBrowser.dock(), DockPosition::Top);
        assert_eq!(PanelKind::QuickDoc.dock(), DockPosition::Bottom);
        assert_eq!(PanelKind::LineNumber.dock(), DockPosition::Left);
    }
}

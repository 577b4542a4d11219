//! Rope-backed text document shared between a host and its components.

use ropey::Rope;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct DocumentInner {
    rope: Rope,
    /// Bumped on every change
    revision: u64,
}

/// Handle to an editor's text document.
///
/// Clones refer to the same document.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    inner: Arc<Mutex<DocumentInner>>,
}

impl TextDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let doc = Self::new();
        doc.set_text(text);
        doc
    }

    fn lock(&self) -> MutexGuard<'_, DocumentInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the whole content. Returns the new revision.
    pub fn set_text(&self, text: &str) -> u64 {
        let mut inner = self.lock();
        inner.rope = Rope::from_str(text);
        inner.revision += 1;
        inner.revision
    }

    /// Insert text at a char index (clamped to the document end).
    pub fn insert(&self, char_idx: usize, text: &str) -> u64 {
        let mut inner = self.lock();
        let idx = char_idx.min(inner.rope.len_chars());
        inner.rope.insert(idx, text);
        inner.revision += 1;
        inner.revision
    }

    pub fn text(&self) -> String {
        self.lock().rope.to_string()
    }

    /// Content of one line without its line break.
    pub fn line(&self, line_idx: usize) -> Option<String> {
        let inner = self.lock();
        if line_idx >= inner.rope.len_lines() {
            return None;
        }
        let line = inner.rope.line(line_idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn len_lines(&self) -> usize {
        self.lock().rope.len_lines()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// True if both handles refer to the same document.
    pub fn same_document(&self, other: &TextDocument) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

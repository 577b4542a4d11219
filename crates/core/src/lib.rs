//! Core types and traits for pyedit.
//!
//! This crate provides the contract between an editor host and the modes
//! and panels installed on it, plus an in-memory host implementation.

pub mod component;
pub mod document;
pub mod event;
pub mod headless;
pub mod host;

pub use component::{AttachContext, Component, ComponentKind, DockPosition, EditorId};
pub use document::TextDocument;
pub use event::EditorEvent;
pub use headless::HeadlessEditor;
pub use host::EditorHost;

// Re-export style types for convenience
pub use pyedit_theme::{StyleHandle, StyleState};

//! Host test double that records every call made on it.

use std::any::Any;

use anyhow::{bail, Result};
use pyedit_core::{
    AttachContext, Component, ComponentKind, DockPosition, EditorHost, EditorId, TextDocument,
};
use pyedit_theme::StyleHandle;

/// One `install_*` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    pub name: &'static str,
    pub kind: ComponentKind,
    pub dock: Option<DockPosition>,
}

pub struct RecordingHost {
    pub id: EditorId,
    pub document: TextDocument,
    pub style: StyleHandle,
    /// Attachment log in call order
    pub log: Vec<Installed>,
    pub components: Vec<Box<dyn Component>>,
    pub word_wrap: bool,
    pub window_title: String,
    pub refreshes: usize,
    /// Install of this component fails
    pub fail_on: Option<&'static str>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::with_style(StyleHandle::new())
    }

    pub fn with_style(style: StyleHandle) -> Self {
        Self {
            id: EditorId::next(),
            document: TextDocument::new(),
            style,
            log: Vec::new(),
            components: Vec::new(),
            word_wrap: true,
            window_title: String::new(),
            refreshes: 0,
            fail_on: None,
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.log.iter().map(|i| i.name).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.log.iter().position(|i| i.name == name)
    }

    pub fn find<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| c.as_any().downcast_ref::<T>())
    }

    fn record(
        &mut self,
        mut component: Box<dyn Component>,
        dock: Option<DockPosition>,
    ) -> Result<()> {
        if self.fail_on == Some(component.name()) {
            bail!("host refused {}", component.name());
        }
        component.attach(&AttachContext {
            editor: self.id,
            document: self.document.clone(),
            style: self.style.clone(),
        });
        self.log.push(Installed {
            name: component.name(),
            kind: component.kind(),
            dock,
        });
        self.components.push(component);
        Ok(())
    }
}

impl EditorHost for RecordingHost {
    fn install_mode(&mut self, mode: Box<dyn Component>) -> Result<()> {
        self.record(mode, None)
    }

    fn install_panel(&mut self, panel: Box<dyn Component>, dock: DockPosition) -> Result<()> {
        self.record(panel, Some(dock))
    }

    fn is_installed(&self, name: &str) -> bool {
        self.log.iter().any(|i| i.name == name)
    }

    fn refresh_style(&mut self) {
        self.refreshes += 1;
    }

    fn document(&self) -> TextDocument {
        self.document.clone()
    }

    fn style(&self) -> &StyleHandle {
        &self.style
    }

    fn set_word_wrap(&mut self, enabled: bool) {
        self.word_wrap = enabled;
    }

    fn set_window_title(&mut self, title: &str) {
        self.window_title = title.to_string();
    }
}

/// Mode with an arbitrary dependency list.
pub struct Dependent {
    pub name: &'static str,
    pub requires: &'static [&'static str],
    pub editor: Option<EditorId>,
}

impl Component for Dependent {
    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Mode
    }

    fn requires(&self) -> &'static [&'static str] {
        self.requires
    }

    fn attach(&mut self, ctx: &AttachContext) {
        self.editor = Some(ctx.editor);
    }

    fn detach(&mut self) {
        self.editor = None;
    }

    fn attached_to(&self) -> Option<EditorId> {
        self.editor
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

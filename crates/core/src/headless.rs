//! In-memory editor host.
//!
//! Implements the full host contract without drawing anything. Used by the
//! command-line front end and by tests that need a real host.

use anyhow::{bail, Result};
use pyedit_theme::StyleHandle;

use crate::{
    AttachContext, Component, ComponentKind, DockPosition, EditorEvent, EditorHost, EditorId,
    TextDocument,
};

/// Installed component with its dock (panels only).
struct Slot {
    component: Box<dyn Component>,
    dock: Option<DockPosition>,
}

/// Editor host that keeps its state in memory.
pub struct HeadlessEditor {
    id: EditorId,
    document: TextDocument,
    style: StyleHandle,
    /// Components in attachment order
    slots: Vec<Slot>,
    word_wrap: bool,
    window_title: String,
    style_refreshes: usize,
}

impl Default for HeadlessEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEditor {
    /// New host with an isolated style state.
    pub fn new() -> Self {
        Self::with_style(StyleHandle::new())
    }

    /// New host rendering with the given style state.
    pub fn with_style(style: StyleHandle) -> Self {
        Self {
            id: EditorId::next(),
            document: TextDocument::new(),
            style,
            slots: Vec::new(),
            word_wrap: true,
            window_title: String::new(),
            style_refreshes: 0,
        }
    }

    pub fn id(&self) -> EditorId {
        self.id
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    /// Number of `refresh_style` calls so far.
    pub fn style_refreshes(&self) -> usize {
        self.style_refreshes
    }

    /// Installed component names in attachment order.
    pub fn installed(&self) -> Vec<&'static str> {
        self.slots.iter().map(|s| s.component.name()).collect()
    }

    /// Names of panels docked to `dock`, in attachment order.
    pub fn panels_at(&self, dock: DockPosition) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|s| s.dock == Some(dock))
            .map(|s| s.component.name())
            .collect()
    }

    /// Installed component by name.
    pub fn component(&self, name: &str) -> Option<&dyn Component> {
        self.slots
            .iter()
            .find(|s| s.component.name() == name)
            .map(|s| s.component.as_ref())
    }

    /// First installed component of concrete type `T`.
    pub fn find<T: Component>(&self) -> Option<&T> {
        self.slots
            .iter()
            .find_map(|s| s.component.as_any().downcast_ref::<T>())
    }

    /// Replace the document text and notify components.
    pub fn set_text(&mut self, text: &str) {
        let revision = self.document.set_text(text);
        self.broadcast(&EditorEvent::TextChanged { revision });
    }

    /// Deliver an event to every component in attachment order.
    pub fn broadcast(&mut self, event: &EditorEvent) {
        for slot in &mut self.slots {
            slot.component.on_event(event);
        }
    }

    /// Detach and drop a component.
    pub fn uninstall(&mut self, name: &str) -> Option<Box<dyn Component>> {
        let pos = self.slots.iter().position(|s| s.component.name() == name)?;
        let mut slot = self.slots.remove(pos);
        slot.component.detach();
        log::debug!("{}: uninstalled {}", self.id, name);
        Some(slot.component)
    }

    fn install(
        &mut self,
        mut component: Box<dyn Component>,
        dock: Option<DockPosition>,
    ) -> Result<()> {
        let name = component.name();
        if self.is_installed(name) {
            bail!("{} is already installed on {}", name, self.id);
        }

        let ctx = AttachContext {
            editor: self.id,
            document: self.document.clone(),
            style: self.style.clone(),
        };
        component.attach(&ctx);
        log::debug!("{}: installed {}", self.id, name);

        self.slots.push(Slot { component, dock });
        Ok(())
    }
}

impl EditorHost for HeadlessEditor {
    fn install_mode(&mut self, mode: Box<dyn Component>) -> Result<()> {
        if mode.kind() != ComponentKind::Mode {
            bail!("{} is not a mode", mode.name());
        }
        self.install(mode, None)
    }

    fn install_panel(&mut self, panel: Box<dyn Component>, dock: DockPosition) -> Result<()> {
        if panel.kind() != ComponentKind::Panel {
            bail!("{} is not a panel", panel.name());
        }
        self.install(panel, Some(dock))
    }

    fn is_installed(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s.component.name() == name)
    }

    fn refresh_style(&mut self) {
        self.style_refreshes += 1;
        self.broadcast(&EditorEvent::StyleRefreshed);
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

impl Drop for HeadlessEditor {
    fn drop(&mut self) {
        self.broadcast(&EditorEvent::Closing);
        while let Some(mut slot) = self.slots.pop() {
            slot.component.detach();
        }
    }
}

//! Component trait definition for editor modes and panels.
//!
//! Components are owned by the host they are installed on. While attached
//! they keep a non-owning reference to the host (its id, document and style
//! handle); detaching drops that reference.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use pyedit_theme::StyleHandle;

use crate::{EditorEvent, TextDocument};

/// Whether a component draws on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Non-visual extension reacting to editing events
    Mode,
    /// Visual extension docked to an edge of the editor
    Panel,
}

/// Edge a panel is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockPosition {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

/// Identity of an editor host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorId(u64);

static NEXT_EDITOR_ID: AtomicU64 = AtomicU64::new(1);

impl EditorId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        Self(NEXT_EDITOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "editor#{}", self.0)
    }
}

/// What a component receives when it is attached.
#[derive(Debug, Clone)]
pub struct AttachContext {
    /// Host the component is attached to
    pub editor: EditorId,
    /// Host's text document
    pub document: TextDocument,
    /// Host's style state
    pub style: StyleHandle,
}

/// Trait for every mode and panel.
///
/// Hosts call `attach` from their install primitives and `detach` when the
/// component is removed or the host is destroyed. Composition code never
/// calls either directly.
pub trait Component: Any {
    /// Unique name, used for dependency declarations.
    fn name(&self) -> &'static str;

    fn kind(&self) -> ComponentKind;

    /// Names of components that must already be installed on the host.
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    /// Attach to a host.
    fn attach(&mut self, ctx: &AttachContext);

    /// Drop the reference to the host.
    fn detach(&mut self);

    /// Host this component is currently attached to.
    fn attached_to(&self) -> Option<EditorId>;

    /// Lifecycle or content notification from the host.
    fn on_event(&mut self, event: &EditorEvent) {
        let _ = event;
    }

    /// Downcast to concrete type (immutable).
    fn as_any(&self) -> &dyn Any;

    /// Downcast to concrete type (mutable).
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("attached_to", &self.attached_to())
            .finish()
    }
}

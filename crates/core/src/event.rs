//! Notifications delivered to attached components.

use std::path::PathBuf;

/// Editor lifecycle and content events.
///
/// Hosts broadcast these to every attached component in attachment order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Document text was replaced or edited
    TextChanged {
        /// Document revision after the change
        revision: u64,
    },

    /// Document was loaded from disk
    FileOpened {
        path: PathBuf,
        /// Declared encoding used for the load
        encoding: String,
    },

    /// Style state changed, colors must be re-read
    StyleRefreshed,

    /// Host is about to be destroyed
    Closing,
}

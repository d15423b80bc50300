//! Document handles shared between the host workspace and the switching core.

use std::fmt;

/// Identity of an open window in the host workspace.
///
/// The core never owns documents; it only compares and stores these handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// Where a piece of content is docked inside the host workspace.
///
/// Only content docked as a document takes part in tab switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockState {
    /// Tabbed into the document area
    #[default]
    Document,
    /// Floating tool window
    Float,
    /// Docked to a side of the workspace as a tool window
    DockSide,
    /// Hidden, still alive
    Hidden,
}

impl DockState {
    /// Returns true if content in this state can be switched to
    pub fn is_document(&self) -> bool {
        matches!(self, DockState::Document)
    }
}

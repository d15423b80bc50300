//! Ordering policies for next/previous document switching.
//!
//! A policy decides what "next" and "previous" mean for the set of open
//! documents. Three are available:
//!
//! - [`VisualOrder`]: pane position, top-to-bottom then left-to-right
//! - [`OpenOrder`]: the order the host opened the documents in
//! - [`MostRecentlyUsed`]: an explicit recency list, most recent first
//!
//! Policies do not hold on to the workspace. It is passed into every
//! operation that needs to read or activate documents.

mod mru;
mod open_order;
mod registry;
mod visual;

pub use mru::MostRecentlyUsed;
pub use open_order::OpenOrder;
pub use registry::{PolicyDescriptor, PolicyRegistry};
pub use visual::VisualOrder;

use crate::document::DocumentId;
use crate::workspace::Workspace;
use std::fmt;
use thiserror::Error;

/// Errors produced by strict policy lookups.
///
/// The soft path ([`PolicyRegistry::resolve`]) never returns these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unknown tab switch policy '{0}'")]
    UnknownPolicy(String),
}

/// Stable identifiers for every policy variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    VisualOrder,
    OpenOrder,
    MostRecentlyUsed,
}

impl PolicyKind {
    /// All kinds in registration order. The first entry is the default.
    pub fn all() -> &'static [PolicyKind] {
        &[
            PolicyKind::VisualOrder,
            PolicyKind::OpenOrder,
            PolicyKind::MostRecentlyUsed,
        ]
    }

    /// Identifier persisted in the config file
    pub fn id(&self) -> &'static str {
        match self {
            PolicyKind::VisualOrder => "visual_order",
            PolicyKind::OpenOrder => "open_order",
            PolicyKind::MostRecentlyUsed => "most_recently_used",
        }
    }

    /// Display text for settings UIs
    pub fn description(&self) -> &'static str {
        match self {
            PolicyKind::VisualOrder => "Visual: Left-to-Right, Top-to-Bottom",
            PolicyKind::OpenOrder => "Open: In the order sessions are opened.",
            PolicyKind::MostRecentlyUsed => "MRU: Similar to Windows Alt-Tab",
        }
    }

    /// Look up a kind by its persisted identifier (exact match after trimming)
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        PolicyKind::all().iter().copied().find(|kind| kind.id() == id)
    }

    /// Construct a fresh, uninitialized policy of this kind
    pub fn create(&self) -> Box<dyn OrderingPolicy> {
        match self {
            PolicyKind::VisualOrder => Box::new(VisualOrder::new()),
            PolicyKind::OpenOrder => Box::new(OpenOrder::new()),
            PolicyKind::MostRecentlyUsed => Box::new(MostRecentlyUsed::new()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Switching direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// How a set of open documents is ordered and how "current" is tracked.
pub trait OrderingPolicy {
    fn kind(&self) -> PolicyKind;

    fn description(&self) -> &'static str {
        self.kind().description()
    }

    /// Bind to the workspace. Discards any prior state and reseeds from the
    /// documents the host currently reports as open.
    fn initialize(&mut self, workspace: &dyn Workspace);

    /// Insert a document. Inserting a known document is a no-op.
    fn add_document(&mut self, doc: DocumentId);

    /// Remove a document. Removing an unknown document is a no-op.
    fn remove_document(&mut self, doc: DocumentId);

    /// Record which document is now current. `None` is a no-op.
    fn set_current(&mut self, doc: Option<DocumentId>);

    /// Activate the next document relative to the host's active one.
    ///
    /// Returns false if the active document is not part of the ordering.
    fn move_next(&mut self, workspace: &mut dyn Workspace) -> bool;

    /// Activate the previous document relative to the host's active one.
    fn move_previous(&mut self, workspace: &mut dyn Workspace) -> bool;

    /// Current ordering
    fn documents(&self, workspace: &dyn Workspace) -> Vec<DocumentId>;

    /// Release any held state
    fn dispose(&mut self);
}

/// Neighbour of `active` in `docs`, wrapping at both ends.
pub(crate) fn neighbour(
    docs: &[DocumentId],
    active: Option<DocumentId>,
    direction: Direction,
) -> Option<DocumentId> {
    let active = active?;
    let idx = docs.iter().position(|doc| *doc == active)?;
    let len = docs.len();
    let target = match direction {
        Direction::Next => (idx + 1) % len,
        Direction::Previous => (idx + len - 1) % len,
    };
    Some(docs[target])
}

/// Activate the neighbour of the host's active document in `docs`.
pub(crate) fn activate_neighbour(
    workspace: &mut dyn Workspace,
    docs: &[DocumentId],
    direction: Direction,
) -> bool {
    match neighbour(docs, workspace.active_document(), direction) {
        Some(target) => workspace.activate(target),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<DocumentId> {
        raw.iter().copied().map(DocumentId).collect()
    }

    #[test]
    fn neighbour_wraps_forward() {
        let docs = ids(&[1, 2, 3]);
        assert_eq!(
            neighbour(&docs, Some(DocumentId(1)), Direction::Next),
            Some(DocumentId(2))
        );
        assert_eq!(
            neighbour(&docs, Some(DocumentId(3)), Direction::Next),
            Some(DocumentId(1))
        );
    }

    #[test]
    fn neighbour_wraps_backward() {
        let docs = ids(&[1, 2, 3]);
        assert_eq!(
            neighbour(&docs, Some(DocumentId(1)), Direction::Previous),
            Some(DocumentId(3))
        );
        assert_eq!(
            neighbour(&docs, Some(DocumentId(2)), Direction::Previous),
            Some(DocumentId(1))
        );
    }

    #[test]
    fn neighbour_of_missing_or_absent_active() {
        let docs = ids(&[1, 2]);
        assert_eq!(neighbour(&docs, Some(DocumentId(9)), Direction::Next), None);
        assert_eq!(neighbour(&docs, None, Direction::Next), None);
        assert_eq!(neighbour(&[], Some(DocumentId(1)), Direction::Previous), None);
    }

    #[test]
    fn single_document_is_its_own_neighbour() {
        let docs = ids(&[7]);
        assert_eq!(
            neighbour(&docs, Some(DocumentId(7)), Direction::Previous),
            Some(DocumentId(7))
        );
    }

    #[test]
    fn kind_ids_round_trip() {
        for kind in PolicyKind::all() {
            assert_eq!(PolicyKind::from_id(kind.id()), Some(*kind));
            assert_eq!(kind.create().kind(), *kind);
        }
        assert_eq!(PolicyKind::from_id("  open_order\n"), Some(PolicyKind::OpenOrder));
        assert_eq!(PolicyKind::from_id("Open_Order"), None);
    }
}

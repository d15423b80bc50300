//! Host workspace boundary.
//!
//! The switching core never renders or lays out windows. Everything it knows
//! about the docking container comes through the [`Workspace`] trait, and every
//! change the container wants to report is pushed as a [`WorkspaceEvent`] over
//! the channel handed out by [`Workspace::subscribe`].

mod dock;

pub use dock::{DockPane, DockPanel};

use crate::document::DocumentId;
use std::sync::mpsc::Receiver;

/// Identifier of a pane inside the host workspace
pub type PaneId = u64;

/// Identifier of an event subscription handed out by a workspace
pub type SubscriptionId = u64;

/// Point-in-time view of a pane and the content tabbed into it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneSnapshot {
    pub id: PaneId,
    /// Top edge of the pane in workspace coordinates
    pub top: i32,
    /// Left edge of the pane in workspace coordinates
    pub left: i32,
    /// Content in the pane's own tab order. May include content that is not
    /// switchable (tool windows); callers filter with [`Workspace::is_switchable`].
    pub contents: Vec<DocumentId>,
}

/// Notifications pushed by the host workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceEvent {
    /// New content was added. Its pane and dock state may still be settling.
    DocumentAdded(DocumentId),
    /// A document whose close hook is installed for this subscription closed.
    DocumentClosed(DocumentId),
    /// The host's active document changed (`None` when nothing is active).
    ActiveDocumentChanged(Option<DocumentId>),
    /// Content was docked or undocked. Check [`Workspace::is_switchable`] for
    /// the new state.
    DockStateChanged(DocumentId),
}

/// Live event subscription returned by [`Workspace::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub receiver: Receiver<WorkspaceEvent>,
}

/// Operations the switching core consumes from the host workspace.
pub trait Workspace {
    /// Snapshot of the open documents in the order they were opened.
    fn documents(&self) -> Vec<DocumentId>;

    /// Snapshot of all panes with their positions and contents.
    fn panes(&self) -> Vec<PaneSnapshot>;

    /// The document the host currently reports as active.
    fn active_document(&self) -> Option<DocumentId>;

    /// Activate a document. Synchronous; the host queues its own
    /// [`WorkspaceEvent::ActiveDocumentChanged`] when the active document
    /// actually changes. Returns false if the document is unknown.
    fn activate(&mut self, doc: DocumentId) -> bool;

    /// True if `doc` is still open and docked as a document.
    fn is_switchable(&self, doc: DocumentId) -> bool;

    /// Display text of a document, if it is still open.
    fn document_text(&self, doc: DocumentId) -> Option<String>;

    /// Start receiving workspace events.
    fn subscribe(&mut self) -> Subscription;

    /// Stop delivering events to a subscription. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Ask for a [`WorkspaceEvent::DocumentClosed`] when `doc` closes.
    fn hook_closed(&mut self, id: SubscriptionId, doc: DocumentId);

    /// Remove a close hook installed by [`Workspace::hook_closed`].
    fn unhook_closed(&mut self, id: SubscriptionId, doc: DocumentId);
}

/// Render a document list with display text, for log lines and traces.
pub fn describe_documents(workspace: &dyn Workspace, docs: &[DocumentId]) -> String {
    docs.iter()
        .map(|doc| workspace.document_text(*doc).unwrap_or_else(|| doc.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

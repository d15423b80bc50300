//! In-memory docking workspace.
//!
//! `DockPanel` is a complete [`Workspace`] host with positioned panes, dock
//! states, event subscriptions and per-document close hooks. It backs the
//! scenario runner and the test suite, and serves as the reference for how a
//! real host is expected to order and deliver its notifications.

use super::{PaneId, PaneSnapshot, Subscription, SubscriptionId, Workspace, WorkspaceEvent};
use crate::document::{DockState, DocumentId};
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Sender};

/// Content hosted by the panel
#[derive(Debug, Clone)]
struct ContentEntry {
    id: DocumentId,
    text: String,
    dock_state: DockState,
    pane: PaneId,
}

/// A pane holding tabbed content at a fixed position
#[derive(Debug, Clone)]
pub struct DockPane {
    pub id: PaneId,
    pub top: i32,
    pub left: i32,
    contents: Vec<DocumentId>,
}

/// In-memory docking container
pub struct DockPanel {
    /// All content, in the order it was opened
    entries: Vec<ContentEntry>,
    /// Panes in creation order (not sorted by position)
    panes: Vec<DockPane>,
    /// Currently active document
    active: Option<DocumentId>,
    /// Counter for generating unique content IDs
    next_document_id: u64,
    /// Counter for generating unique pane IDs
    next_pane_id: PaneId,
    /// Counter for generating unique subscription IDs
    next_subscription_id: SubscriptionId,
    subscribers: HashMap<SubscriptionId, Sender<WorkspaceEvent>>,
    close_hooks: HashSet<(SubscriptionId, DocumentId)>,
}

impl DockPanel {
    /// Create an empty panel with no panes
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            panes: Vec::new(),
            active: None,
            next_document_id: 1,
            next_pane_id: 1,
            next_subscription_id: 1,
            subscribers: HashMap::new(),
            close_hooks: HashSet::new(),
        }
    }

    /// Add an empty pane at the given position and return its ID
    pub fn add_pane(&mut self, top: i32, left: i32) -> PaneId {
        let id = self.next_pane_id;
        self.next_pane_id += 1;
        self.panes.push(DockPane {
            id,
            top,
            left,
            contents: Vec::new(),
        });
        log::debug!("Added pane {} at top={} left={}", id, top, left);
        id
    }

    /// Move a pane to a new position. Returns false if the pane is unknown.
    pub fn move_pane(&mut self, id: PaneId, top: i32, left: i32) -> bool {
        match self.panes.iter_mut().find(|p| p.id == id) {
            Some(pane) => {
                pane.top = top;
                pane.left = left;
                true
            }
            None => false,
        }
    }

    /// Open a document in a pane and make it active
    ///
    /// Returns `None` if the pane does not exist.
    pub fn open_document(&mut self, text: &str, pane: PaneId) -> Option<DocumentId> {
        let id = self.insert_content(text, pane, DockState::Document)?;
        self.activate(id);
        Some(id)
    }

    /// Open non-document content (a tool window) in a pane
    ///
    /// The host still announces it as added content; the switching core is
    /// expected to notice it is not switchable and ignore it.
    pub fn open_tool_window(
        &mut self,
        text: &str,
        pane: PaneId,
        dock_state: DockState,
    ) -> Option<DocumentId> {
        self.insert_content(text, pane, dock_state)
    }

    fn insert_content(
        &mut self,
        text: &str,
        pane: PaneId,
        dock_state: DockState,
    ) -> Option<DocumentId> {
        let pane_entry = self.panes.iter_mut().find(|p| p.id == pane)?;

        let id = DocumentId(self.next_document_id);
        self.next_document_id += 1;

        pane_entry.contents.push(id);
        self.entries.push(ContentEntry {
            id,
            text: text.to_string(),
            dock_state,
            pane,
        });

        log::info!(
            "Opened '{}' as {} in pane {} (total: {})",
            text,
            id,
            pane,
            self.entries.len()
        );
        self.emit(WorkspaceEvent::DocumentAdded(id));
        Some(id)
    }

    /// Change how content is docked. Returns false if the content is unknown.
    ///
    /// Subscribers are told only when the dock state actually changes.
    pub fn set_dock_state(&mut self, id: DocumentId, dock_state: DockState) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if entry.dock_state != dock_state {
            log::debug!(
                "'{}' ({}) dock state {:?} -> {:?}",
                entry.text,
                id,
                entry.dock_state,
                dock_state
            );
            entry.dock_state = dock_state;
            self.emit(WorkspaceEvent::DockStateChanged(id));
        }
        true
    }

    /// Close content by ID
    ///
    /// Fires the close notification for every subscription that hooked the
    /// content, then picks a new active document if the closed one was active.
    pub fn close_document(&mut self, id: DocumentId) -> bool {
        let Some(idx) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };

        let entry = self.entries.remove(idx);
        let mut neighbour = None;
        if let Some(pane) = self.panes.iter_mut().find(|p| p.id == entry.pane)
            && let Some(pos) = pane.contents.iter().position(|c| *c == id)
        {
            pane.contents.remove(pos);
            // Prefer the tab at the same index (or previous if at end)
            if !pane.contents.is_empty() {
                neighbour = Some(pane.contents[pos.min(pane.contents.len() - 1)]);
            }
        }
        log::info!("Closed '{}' ({})", entry.text, id);

        let hooked: Vec<SubscriptionId> = self
            .close_hooks
            .iter()
            .filter(|(_, doc)| *doc == id)
            .map(|(sub, _)| *sub)
            .collect();
        for sub in hooked {
            self.close_hooks.remove(&(sub, id));
            self.send_to(sub, WorkspaceEvent::DocumentClosed(id));
        }

        if self.active == Some(id) {
            let next_active = neighbour
                .filter(|doc| self.is_switchable(*doc))
                .or_else(|| self.documents().last().copied());
            self.active = next_active;
            self.emit(WorkspaceEvent::ActiveDocumentChanged(next_active));
        }
        true
    }

    /// Look up open content by display text
    pub fn find_by_text(&self, text: &str) -> Option<DocumentId> {
        self.entries.iter().find(|e| e.text == text).map(|e| e.id)
    }

    /// Panes in creation order
    pub fn pane_list(&self) -> &[DockPane] {
        &self.panes
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of installed close hooks across all subscriptions
    pub fn close_hook_count(&self) -> usize {
        self.close_hooks.len()
    }

    fn emit(&mut self, event: WorkspaceEvent) {
        // Receivers dropped without unsubscribing are pruned here
        self.subscribers.retain(|_, sender| sender.send(event).is_ok());
    }

    fn send_to(&mut self, id: SubscriptionId, event: WorkspaceEvent) {
        let disconnected = match self.subscribers.get(&id) {
            Some(sender) => sender.send(event).is_err(),
            None => false,
        };
        if disconnected {
            self.subscribers.remove(&id);
        }
    }
}

impl Default for DockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace for DockPanel {
    fn documents(&self) -> Vec<DocumentId> {
        self.entries
            .iter()
            .filter(|e| e.dock_state.is_document())
            .map(|e| e.id)
            .collect()
    }

    fn panes(&self) -> Vec<PaneSnapshot> {
        self.panes
            .iter()
            .map(|p| PaneSnapshot {
                id: p.id,
                top: p.top,
                left: p.left,
                contents: p.contents.clone(),
            })
            .collect()
    }

    fn active_document(&self) -> Option<DocumentId> {
        self.active
    }

    fn activate(&mut self, doc: DocumentId) -> bool {
        if !self.entries.iter().any(|e| e.id == doc) {
            return false;
        }
        if self.active != Some(doc) {
            self.active = Some(doc);
            log::debug!("Activated {}", doc);
            self.emit(WorkspaceEvent::ActiveDocumentChanged(Some(doc)));
        }
        true
    }

    fn is_switchable(&self, doc: DocumentId) -> bool {
        self.entries
            .iter()
            .any(|e| e.id == doc && e.dock_state.is_document())
    }

    fn document_text(&self, doc: DocumentId) -> Option<String> {
        self.entries
            .iter()
            .find(|e| e.id == doc)
            .map(|e| e.text.clone())
    }

    fn subscribe(&mut self) -> Subscription {
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        let (sender, receiver) = mpsc::channel();
        self.subscribers.insert(id, sender);
        Subscription { id, receiver }
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.remove(&id);
        self.close_hooks.retain(|(sub, _)| *sub != id);
    }

    fn hook_closed(&mut self, id: SubscriptionId, doc: DocumentId) {
        if self.subscribers.contains_key(&id) {
            self.close_hooks.insert((id, doc));
        }
    }

    fn unhook_closed(&mut self, id: SubscriptionId, doc: DocumentId) {
        self.close_hooks.remove(&(id, doc));
    }
}

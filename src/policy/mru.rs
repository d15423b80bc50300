//! Most-recently-used ordering.

use super::{Direction, OrderingPolicy, PolicyKind, neighbour};
use crate::document::DocumentId;
use crate::workspace::Workspace;

/// Keeps an explicit recency list, most recent first.
///
/// New documents join at the tail as least recently used and only move to
/// the head through [`OrderingPolicy::set_current`]. Next/previous walk the
/// list positionally and wrap at both ends, skipping entries the host no
/// longer reports as switchable.
#[derive(Debug, Default)]
pub struct MostRecentlyUsed {
    docs: Vec<DocumentId>,
    initialized: bool,
}

impl MostRecentlyUsed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recency list, most recent first
    pub fn order(&self) -> &[DocumentId] {
        &self.docs
    }

    fn step(&self, workspace: &mut dyn Workspace, direction: Direction) -> bool {
        if !self.initialized {
            log::warn!("MRU policy used before initialize");
            return false;
        }
        let docs: Vec<DocumentId> = self
            .docs
            .iter()
            .copied()
            .filter(|doc| workspace.is_switchable(*doc))
            .collect();
        match neighbour(&docs, workspace.active_document(), direction) {
            Some(target) => workspace.activate(target),
            None => false,
        }
    }
}

impl OrderingPolicy for MostRecentlyUsed {
    fn kind(&self) -> PolicyKind {
        PolicyKind::MostRecentlyUsed
    }

    fn initialize(&mut self, workspace: &dyn Workspace) {
        self.docs = workspace.documents();
        self.initialized = true;
    }

    fn add_document(&mut self, doc: DocumentId) {
        if !self.docs.contains(&doc) {
            self.docs.push(doc);
        }
    }

    fn remove_document(&mut self, doc: DocumentId) {
        self.docs.retain(|d| *d != doc);
    }

    fn set_current(&mut self, doc: Option<DocumentId>) {
        let Some(doc) = doc else {
            return;
        };
        if let Some(idx) = self.docs.iter().position(|d| *d == doc) {
            let doc = self.docs.remove(idx);
            self.docs.insert(0, doc);
        }
    }

    fn move_next(&mut self, workspace: &mut dyn Workspace) -> bool {
        self.step(workspace, Direction::Next)
    }

    fn move_previous(&mut self, workspace: &mut dyn Workspace) -> bool {
        self.step(workspace, Direction::Previous)
    }

    fn documents(&self, _workspace: &dyn Workspace) -> Vec<DocumentId> {
        self.docs.clone()
    }

    fn dispose(&mut self) {
        self.docs.clear();
        self.initialized = false;
    }
}

//! Open ordering: documents in the order the host opened them.

use super::{Direction, OrderingPolicy, PolicyKind, activate_neighbour};
use crate::document::DocumentId;
use crate::workspace::Workspace;

/// Orders documents by the host's own open-order view, queried fresh each time.
#[derive(Debug, Default)]
pub struct OpenOrder {
    initialized: bool,
}

impl OpenOrder {
    pub fn new() -> Self {
        Self::default()
    }

    fn step(&self, workspace: &mut dyn Workspace, direction: Direction) -> bool {
        if !self.initialized {
            log::warn!("Open order policy used before initialize");
            return false;
        }
        let docs = workspace.documents();
        activate_neighbour(workspace, &docs, direction)
    }
}

impl OrderingPolicy for OpenOrder {
    fn kind(&self) -> PolicyKind {
        PolicyKind::OpenOrder
    }

    fn initialize(&mut self, _workspace: &dyn Workspace) {
        self.initialized = true;
    }

    fn add_document(&mut self, _doc: DocumentId) {}

    fn remove_document(&mut self, _doc: DocumentId) {}

    fn set_current(&mut self, _doc: Option<DocumentId>) {}

    fn move_next(&mut self, workspace: &mut dyn Workspace) -> bool {
        self.step(workspace, Direction::Next)
    }

    fn move_previous(&mut self, workspace: &mut dyn Workspace) -> bool {
        self.step(workspace, Direction::Previous)
    }

    fn documents(&self, workspace: &dyn Workspace) -> Vec<DocumentId> {
        workspace.documents()
    }

    fn dispose(&mut self) {
        self.initialized = false;
    }
}

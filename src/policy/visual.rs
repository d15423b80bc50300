//! Visual ordering: panes top-to-bottom, then left-to-right.

use super::{Direction, OrderingPolicy, PolicyKind, activate_neighbour};
use crate::document::DocumentId;
use crate::workspace::Workspace;

/// Orders documents by where their pane sits on screen.
///
/// The ordering is derived fresh from the workspace on every call, so
/// membership changes need no bookkeeping here.
#[derive(Debug, Default)]
pub struct VisualOrder {
    initialized: bool,
}

impl VisualOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the visual ordering of switchable documents.
    ///
    /// Panes are stable-sorted by top edge, ties broken by left edge; each
    /// pane contributes its documents in its own tab order.
    pub fn visual_documents(workspace: &dyn Workspace) -> Vec<DocumentId> {
        let mut panes = workspace.panes();
        panes.sort_by(|a, b| a.top.cmp(&b.top).then(a.left.cmp(&b.left)));

        panes
            .iter()
            .flat_map(|pane| pane.contents.iter().copied())
            .filter(|doc| workspace.is_switchable(*doc))
            .collect()
    }

    fn step(&self, workspace: &mut dyn Workspace, direction: Direction) -> bool {
        if !self.initialized {
            log::warn!("Visual order policy used before initialize");
            return false;
        }
        let docs = Self::visual_documents(workspace);
        activate_neighbour(workspace, &docs, direction)
    }
}

impl OrderingPolicy for VisualOrder {
    fn kind(&self) -> PolicyKind {
        PolicyKind::VisualOrder
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
        Self::visual_documents(workspace)
    }

    fn dispose(&mut self) {
        self.initialized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DockState;
    use crate::workspace::DockPanel;

    /// Four panes laid out in a 2x2 grid, created out of visual order
    fn grid() -> (DockPanel, Vec<DocumentId>) {
        let mut panel = DockPanel::new();
        let bottom_right = panel.add_pane(100, 100);
        let top_right = panel.add_pane(0, 100);
        let bottom_left = panel.add_pane(100, 0);
        let top_left = panel.add_pane(0, 0);

        let d = panel.open_document("D", bottom_right).unwrap();
        let b = panel.open_document("B", top_right).unwrap();
        let c = panel.open_document("C", bottom_left).unwrap();
        let a1 = panel.open_document("A1", top_left).unwrap();
        let a2 = panel.open_document("A2", top_left).unwrap();
        (panel, vec![a1, a2, b, c, d])
    }

    #[test]
    fn orders_by_top_then_left() {
        let (panel, expected) = grid();
        assert_eq!(VisualOrder::visual_documents(&panel), expected);
    }

    #[test]
    fn pane_ties_keep_tab_order() {
        let mut panel = DockPanel::new();
        let pane = panel.add_pane(0, 0);
        let x = panel.open_document("X", pane).unwrap();
        let y = panel.open_document("Y", pane).unwrap();
        let z = panel.open_document("Z", pane).unwrap();
        assert_eq!(VisualOrder::visual_documents(&panel), vec![x, y, z]);
    }

    #[test]
    fn identical_positions_keep_pane_creation_order() {
        let mut panel = DockPanel::new();
        let first = panel.add_pane(10, 10);
        let second = panel.add_pane(10, 10);
        let p = panel.open_document("P", second).unwrap();
        let q = panel.open_document("Q", first).unwrap();
        assert_eq!(VisualOrder::visual_documents(&panel), vec![q, p]);
    }

    #[test]
    fn skips_tool_windows() {
        let mut panel = DockPanel::new();
        let pane = panel.add_pane(0, 0);
        let a = panel.open_document("A", pane).unwrap();
        panel.open_tool_window("Output", pane, DockState::Float);
        let b = panel.open_document("B", pane).unwrap();
        assert_eq!(VisualOrder::visual_documents(&panel), vec![a, b]);
    }

    #[test]
    fn follows_pane_moves() {
        let (mut panel, _) = grid();
        let mut policy = VisualOrder::new();
        policy.initialize(&panel);

        // Bring the bottom-right pane (created first) to the very top
        panel.move_pane(1, -50, 0);
        let docs = policy.documents(&panel);
        assert_eq!(panel.document_text(docs[0]).as_deref(), Some("D"));
    }

    #[test]
    fn next_and_previous_wrap() {
        let (mut panel, order) = grid();
        let mut policy = VisualOrder::new();
        policy.initialize(&panel);

        panel.activate(order[4]);
        assert!(policy.move_next(&mut panel));
        assert_eq!(panel.active_document(), Some(order[0]));

        assert!(policy.move_previous(&mut panel));
        assert_eq!(panel.active_document(), Some(order[4]));
    }

    #[test]
    fn active_tool_window_is_not_switchable() {
        let mut panel = DockPanel::new();
        let pane = panel.add_pane(0, 0);
        panel.open_document("A", pane).unwrap();
        let tool = panel
            .open_tool_window("Output", pane, DockState::Float)
            .unwrap();
        panel.activate(tool);

        let mut policy = VisualOrder::new();
        policy.initialize(&panel);
        assert!(!policy.move_next(&mut panel));
        assert_eq!(panel.active_document(), Some(tool));
    }

    #[test]
    fn empty_workspace_does_not_switch() {
        let mut panel = DockPanel::new();
        let mut policy = VisualOrder::new();
        policy.initialize(&panel);
        assert!(!policy.move_next(&mut panel));
        assert!(!policy.move_previous(&mut panel));
        assert!(policy.documents(&panel).is_empty());
    }

    #[test]
    fn uninitialized_policy_does_not_switch() {
        let (mut panel, _) = grid();
        let mut policy = VisualOrder::new();
        assert!(!policy.move_next(&mut panel));
    }
}

//! Shared integration test helpers for tab-switcher.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{single_pane, switcher_for};
//! ```

#![allow(dead_code)]

use tab_switcher::{DockPanel, DocumentId, PolicyRegistry, TabSwitcher};

/// A panel with one pane holding `names`, opened in order. The last one is active.
pub fn single_pane(names: &[&str]) -> (DockPanel, Vec<DocumentId>) {
    let mut panel = DockPanel::new();
    let pane = panel.add_pane(0, 0);
    let docs = names
        .iter()
        .map(|name| panel.open_document(name, pane).expect("pane exists"))
        .collect();
    (panel, docs)
}

/// Two rows of two panes, created in scrambled order, one document each.
///
/// Returns the documents in visual order: top-left, top-right, bottom-left,
/// bottom-right.
pub fn grid_panel() -> (DockPanel, Vec<DocumentId>) {
    let mut panel = DockPanel::new();
    let bottom_left = panel.add_pane(300, 0);
    let top_right = panel.add_pane(0, 500);
    let bottom_right = panel.add_pane(300, 500);
    let top_left = panel.add_pane(0, 0);

    let bl = panel.open_document("BL", bottom_left).expect("pane exists");
    let tr = panel.open_document("TR", top_right).expect("pane exists");
    let br = panel.open_document("BR", bottom_right).expect("pane exists");
    let tl = panel.open_document("TL", top_left).expect("pane exists");
    (panel, vec![tl, tr, bl, br])
}

pub fn switcher_for(panel: DockPanel, strategy: &str) -> TabSwitcher<DockPanel> {
    TabSwitcher::new(panel, &PolicyRegistry::new(), Some(strategy))
}

/// Display text of the host's active document
pub fn active_text(switcher: &TabSwitcher<DockPanel>) -> Option<String> {
    use tab_switcher::Workspace;
    let workspace = switcher.workspace();
    workspace
        .active_document()
        .and_then(|doc| workspace.document_text(doc))
}

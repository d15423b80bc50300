//! Next/previous document switching for tabbed docking workspaces.
//!
//! The host workspace owns the windows; this crate decides what "next" and
//! "previous" mean. A [`TabSwitcher`] observes the host through the
//! [`Workspace`] trait and delegates ordering to one of the policies in
//! [`policy`], resolved by identifier through a [`PolicyRegistry`].
//!
//! ```
//! use tab_switcher::{DockPanel, PolicyRegistry, TabSwitcher, Workspace};
//!
//! let mut panel = DockPanel::new();
//! let pane = panel.add_pane(0, 0);
//! let a = panel.open_document("A", pane).unwrap();
//! panel.open_document("B", pane).unwrap();
//!
//! let registry = PolicyRegistry::new();
//! let mut switcher = TabSwitcher::new(panel, &registry, Some("open_order"));
//! assert!(switcher.move_next());
//! assert_eq!(switcher.workspace().active_document(), Some(a));
//! ```

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod document;
pub mod policy;
pub mod scenario;
pub mod switcher;
pub mod workspace;

pub use document::{DockState, DocumentId};
pub use policy::{
    MostRecentlyUsed, OpenOrder, OrderingPolicy, PolicyDescriptor, PolicyError, PolicyKind,
    PolicyRegistry, VisualOrder,
};
pub use scenario::{Scenario, ScenarioError, TraceEntry};
pub use switcher::{SwitchState, TabSwitcher};
pub use workspace::{DockPanel, PaneSnapshot, Workspace, WorkspaceEvent};

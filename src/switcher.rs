//! Tab switch coordinator.
//!
//! `TabSwitcher` sits between the host workspace and the active ordering
//! policy. It keeps the policy's view of open documents in sync with the
//! host, forwards next/previous requests, and hot-swaps policies.
//!
//! Host notifications arrive over the workspace subscription channel and are
//! drained on the caller's loop:
//!
//! - `DocumentAdded` is deferred until the current drain completes so the new
//!   document's pane and dock state have settled, then re-verified.
//! - `DocumentClosed` removes the document from the active policy.
//! - `DockStateChanged` removes a document that was undocked, or queues a
//!   re-docked one like a new addition.
//! - `ActiveDocumentChanged` updates the current document. While a switch is
//!   in progress the policy is not told, so a programmatic activation cannot
//!   reorder the list being walked.

use crate::document::DocumentId;
use crate::policy::{Direction, OrderingPolicy, PolicyKind, PolicyRegistry};
use crate::workspace::{Subscription, Workspace, WorkspaceEvent, describe_documents};
use std::collections::{HashSet, VecDeque};

/// Whether a programmatic switch is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchState {
    #[default]
    Idle,
    /// A next/previous request is activating a document. Cleared as soon as
    /// the resulting active-document notification has been recorded.
    Switching,
}

/// Work queued to run after the current event drain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredTask {
    AddDocument(DocumentId),
}

/// Coordinates document switching for one host workspace
pub struct TabSwitcher<W: Workspace> {
    workspace: W,
    /// `None` once disposed
    subscription: Option<Subscription>,
    policy: Box<dyn OrderingPolicy>,
    state: SwitchState,
    current: Option<DocumentId>,
    /// Active document when the switcher was created
    initial_document: Option<DocumentId>,
    deferred: VecDeque<DeferredTask>,
    /// Documents whose close hook is installed
    hooked: HashSet<DocumentId>,
}

impl<W: Workspace> TabSwitcher<W> {
    /// Bind to a workspace with the policy named by `strategy`
    ///
    /// A missing or unknown identifier selects the registry's default policy.
    pub fn new(mut workspace: W, registry: &PolicyRegistry, strategy: Option<&str>) -> Self {
        let subscription = workspace.subscribe();
        let policy = match strategy {
            Some(id) => registry.resolve(id),
            None => registry.default_kind().create(),
        };
        let initial_document = workspace.active_document();

        let mut switcher = Self {
            workspace,
            subscription: Some(subscription),
            policy,
            state: SwitchState::Idle,
            current: None,
            initial_document,
            deferred: VecDeque::new(),
            hooked: HashSet::new(),
        };
        switcher.install_policy();
        switcher
    }

    /// The active policy
    pub fn policy(&self) -> &dyn OrderingPolicy {
        self.policy.as_ref()
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Replace the active policy
    ///
    /// The old policy is disposed; the new one is initialized and reseeded
    /// with every document the host currently reports as open.
    pub fn set_policy(&mut self, policy: Box<dyn OrderingPolicy>) {
        log::info!("Cleaning up old strategy: {}", self.policy.description());
        self.policy.dispose();
        self.policy = policy;
        self.install_policy();
    }

    /// Replace the active policy by identifier, defaulting softly
    pub fn set_policy_by_id(&mut self, registry: &PolicyRegistry, id: &str) -> PolicyKind {
        self.set_policy(registry.resolve(id));
        self.policy.kind()
    }

    fn install_policy(&mut self) {
        log::info!("Initializing new strategy: {}", self.policy.description());
        self.policy.initialize(&self.workspace);

        for doc in self.workspace.documents() {
            self.add_document(doc);
        }

        let fallback = self
            .initial_document
            .filter(|doc| self.workspace.is_switchable(*doc));
        let current = self.workspace.active_document().or(fallback);
        self.set_current_document(current);
    }

    /// Document considered selected for switching bookkeeping
    pub fn current_document(&self) -> Option<DocumentId> {
        self.current
    }

    /// Record the current document and tell the policy about it
    ///
    /// Always propagates and always leaves the switcher `Idle`, so hosts call
    /// this to commit a switch sequence (e.g. when the switch modifier is
    /// released).
    pub fn set_current_document(&mut self, doc: Option<DocumentId>) {
        self.current = doc;
        self.policy.set_current(doc);
        self.state = SwitchState::Idle;
        self.log_order();
    }

    fn on_active_document_changed(&mut self, doc: Option<DocumentId>) {
        match self.state {
            SwitchState::Idle => {
                self.current = doc;
                self.policy.set_current(doc);
                self.log_order();
            }
            SwitchState::Switching => {
                log::trace!("Switch activated {:?}; policy order left unchanged", doc);
                self.current = doc;
            }
        }
        self.state = SwitchState::Idle;
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// Activate the next document per the active policy
    ///
    /// Returns false if nothing could be switched to.
    pub fn move_next(&mut self) -> bool {
        self.switch(Direction::Next)
    }

    /// Activate the previous document per the active policy
    pub fn move_previous(&mut self) -> bool {
        self.switch(Direction::Previous)
    }

    fn switch(&mut self, direction: Direction) -> bool {
        if self.is_disposed() {
            log::warn!("Tab switch requested after dispose");
            return false;
        }

        // Anything the user did before this request must not consume the guard
        self.process_events();

        self.state = SwitchState::Switching;
        let switched = match direction {
            Direction::Next => self.policy.move_next(&mut self.workspace),
            Direction::Previous => self.policy.move_previous(&mut self.workspace),
        };
        self.process_events();
        // No notification arrives when nothing was activated or the target was
        // already active
        self.state = SwitchState::Idle;

        switched
    }

    /// Drain pending workspace events, then run deferred work
    pub fn tick(&mut self) {
        self.process_events();
        self.run_deferred();
    }

    fn process_events(&mut self) {
        loop {
            let events: Vec<WorkspaceEvent> = match &self.subscription {
                Some(subscription) => subscription.receiver.try_iter().collect(),
                None => return,
            };
            if events.is_empty() {
                return;
            }
            for event in events {
                self.handle_event(event);
            }
        }
    }

    fn handle_event(&mut self, event: WorkspaceEvent) {
        match event {
            WorkspaceEvent::DocumentAdded(doc) => {
                self.deferred.push_back(DeferredTask::AddDocument(doc));
            }
            WorkspaceEvent::DocumentClosed(doc) => self.remove_document(doc),
            WorkspaceEvent::ActiveDocumentChanged(doc) => self.on_active_document_changed(doc),
            WorkspaceEvent::DockStateChanged(doc) => {
                if self.workspace.is_switchable(doc) {
                    self.deferred.push_back(DeferredTask::AddDocument(doc));
                } else {
                    self.remove_document(doc);
                }
            }
        }
    }

    fn run_deferred(&mut self) {
        while let Some(task) = self.deferred.pop_front() {
            match task {
                DeferredTask::AddDocument(doc) => {
                    // Layout may have changed since the add was announced
                    if self.workspace.is_switchable(doc) {
                        self.add_document(doc);
                    } else {
                        log::debug!("Dropping deferred add of {}: not a switchable document", doc);
                    }
                }
            }
        }
    }

    /// Number of deferred tasks waiting for the next tick
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    fn add_document(&mut self, doc: DocumentId) {
        log::debug!("Tracking '{}' ({})", self.text_of(doc), doc);
        self.policy.add_document(doc);
        if let Some(subscription) = &self.subscription
            && self.hooked.insert(doc)
        {
            self.workspace.hook_closed(subscription.id, doc);
        }
    }

    fn remove_document(&mut self, doc: DocumentId) {
        if self.hooked.remove(&doc)
            && let Some(subscription) = &self.subscription
        {
            log::debug!("No longer tracking '{}' ({})", self.text_of(doc), doc);
            self.workspace.unhook_closed(subscription.id, doc);
        }
        self.policy.remove_document(doc);
        if self.current == Some(doc) {
            self.current = None;
        }
    }

    /// Ordering of the active policy
    pub fn documents(&self) -> Vec<DocumentId> {
        self.policy.documents(&self.workspace)
    }

    /// Ordering of the active policy rendered with document text
    pub fn describe(&self) -> String {
        describe_documents(&self.workspace, &self.documents())
    }

    fn text_of(&self, doc: DocumentId) -> String {
        self.workspace
            .document_text(doc)
            .unwrap_or_else(|| doc.to_string())
    }

    fn log_order(&self) {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("{} order: {}", self.policy.kind(), self.describe());
        }
    }

    pub fn workspace(&self) -> &W {
        &self.workspace
    }

    /// Mutable host access; changes are picked up on the next [`Self::tick`]
    pub fn workspace_mut(&mut self) -> &mut W {
        &mut self.workspace
    }

    pub fn is_disposed(&self) -> bool {
        self.subscription.is_none()
    }

    /// Unhook from the workspace
    ///
    /// Drops the event subscription and every per-document close hook. The
    /// active policy is left as is. Calling this more than once is harmless.
    pub fn dispose(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        for doc in self.hooked.drain() {
            self.workspace.unhook_closed(subscription.id, doc);
        }
        self.workspace.unsubscribe(subscription.id);
        self.deferred.clear();
        self.state = SwitchState::Idle;
        log::info!("Tab switcher disposed");
    }
}

impl<W: Workspace> Drop for TabSwitcher<W> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DockState;
    use crate::workspace::DockPanel;

    fn panel_with(names: &[&str]) -> (DockPanel, Vec<DocumentId>) {
        let mut panel = DockPanel::new();
        let pane = panel.add_pane(0, 0);
        let docs = names
            .iter()
            .map(|name| panel.open_document(name, pane).unwrap())
            .collect();
        (panel, docs)
    }

    fn open(switcher: &mut TabSwitcher<DockPanel>, name: &str) -> DocumentId {
        let pane = switcher.workspace().pane_list()[0].id;
        switcher.workspace_mut().open_document(name, pane).unwrap()
    }

    #[test]
    fn construction_seeds_and_captures_active() {
        let (panel, docs) = panel_with(&["A", "B", "C"]);
        let registry = PolicyRegistry::new();
        let switcher = TabSwitcher::new(panel, &registry, Some("most_recently_used"));

        assert_eq!(switcher.policy_kind(), PolicyKind::MostRecentlyUsed);
        assert_eq!(switcher.current_document(), Some(docs[2]));
        // C was active, so it leads the recency list
        assert_eq!(switcher.documents(), vec![docs[2], docs[0], docs[1]]);
        assert_eq!(switcher.workspace().close_hook_count(), 3);
    }

    #[test]
    fn missing_strategy_uses_default() {
        let (panel, _) = panel_with(&["A"]);
        let switcher = TabSwitcher::new(panel, &PolicyRegistry::new(), None);
        assert_eq!(switcher.policy_kind(), PolicyKind::VisualOrder);
    }

    #[test]
    fn added_documents_are_deferred_until_tick() {
        let (panel, _) = panel_with(&["A"]);
        let mut switcher =
            TabSwitcher::new(panel, &PolicyRegistry::new(), Some("most_recently_used"));

        let b = open(&mut switcher, "B");
        assert!(!switcher.documents().contains(&b));

        switcher.tick();
        assert!(switcher.documents().contains(&b));
        assert_eq!(switcher.pending_deferred(), 0);
    }

    #[test]
    fn deferred_add_is_dropped_when_no_longer_a_document() {
        let (panel, _) = panel_with(&["A"]);
        let mut switcher =
            TabSwitcher::new(panel, &PolicyRegistry::new(), Some("most_recently_used"));

        let b = open(&mut switcher, "B");
        switcher.workspace_mut().set_dock_state(b, DockState::Float);
        switcher.tick();

        assert!(!switcher.documents().contains(&b));
        assert_eq!(switcher.workspace().close_hook_count(), 1);
    }

    #[test]
    fn undocked_document_leaves_policy_and_returns_when_redocked() {
        let (panel, docs) = panel_with(&["A", "B", "C"]);
        let mut switcher =
            TabSwitcher::new(panel, &PolicyRegistry::new(), Some("most_recently_used"));

        switcher.workspace_mut().set_dock_state(docs[1], DockState::Float);
        switcher.tick();
        assert_eq!(switcher.documents(), vec![docs[2], docs[0]]);
        assert_eq!(switcher.workspace().close_hook_count(), 2);

        switcher.workspace_mut().set_dock_state(docs[1], DockState::Document);
        assert_eq!(switcher.pending_deferred(), 0);
        switcher.tick();
        assert_eq!(switcher.documents(), vec![docs[2], docs[0], docs[1]]);
        assert_eq!(switcher.workspace().close_hook_count(), 3);
    }

    #[test]
    fn describe_renders_document_text() {
        let (panel, _) = panel_with(&["A", "B", "C"]);
        let switcher =
            TabSwitcher::new(panel, &PolicyRegistry::new(), Some("most_recently_used"));
        assert_eq!(switcher.describe(), "C, A, B");
    }

    #[test]
    fn tool_windows_are_never_added() {
        let (panel, _) = panel_with(&["A"]);
        let mut switcher =
            TabSwitcher::new(panel, &PolicyRegistry::new(), Some("most_recently_used"));

        let pane = switcher.workspace().pane_list()[0].id;
        let tool = switcher
            .workspace_mut()
            .open_tool_window("Output", pane, DockState::DockSide)
            .unwrap();
        switcher.tick();
        assert!(!switcher.documents().contains(&tool));
    }

    #[test]
    fn close_removes_from_policy_and_clears_current() {
        let (panel, docs) = panel_with(&["A", "B"]);
        let mut switcher =
            TabSwitcher::new(panel, &PolicyRegistry::new(), Some("most_recently_used"));

        switcher.workspace_mut().close_document(docs[1]);
        switcher.tick();

        // Host moved activation to A after B closed
        assert_eq!(switcher.documents(), vec![docs[0]]);
        assert_eq!(switcher.current_document(), Some(docs[0]));
    }

    #[test]
    fn switch_does_not_reorder_mru() {
        let (panel, docs) = panel_with(&["A", "B", "C"]);
        let mut switcher =
            TabSwitcher::new(panel, &PolicyRegistry::new(), Some("most_recently_used"));
        let before = switcher.documents();

        assert!(switcher.move_next());

        assert_eq!(switcher.documents(), before);
        assert_eq!(switcher.current_document(), Some(docs[0]));
        assert_eq!(switcher.state(), SwitchState::Idle);
    }

    #[test]
    fn user_activation_after_switch_reorders_mru() {
        let (panel, docs) = panel_with(&["A", "B", "C"]);
        let mut switcher =
            TabSwitcher::new(panel, &PolicyRegistry::new(), Some("most_recently_used"));

        assert!(switcher.move_next());
        switcher.workspace_mut().activate(docs[1]);
        switcher.tick();

        assert_eq!(switcher.documents()[0], docs[1]);
    }

    #[test]
    fn failed_switch_returns_to_idle() {
        let mut panel = DockPanel::new();
        panel.add_pane(0, 0);
        let mut switcher = TabSwitcher::new(panel, &PolicyRegistry::new(), None);

        assert!(!switcher.move_next());
        assert!(!switcher.move_previous());
        assert_eq!(switcher.state(), SwitchState::Idle);
    }

    #[test]
    fn pending_user_activation_is_not_swallowed_by_switch() {
        let (panel, docs) = panel_with(&["A", "B", "C"]);
        let mut switcher =
            TabSwitcher::new(panel, &PolicyRegistry::new(), Some("most_recently_used"));

        // User clicks A; the notification is still queued when next is pressed
        switcher.workspace_mut().activate(docs[0]);
        assert!(switcher.move_next());

        assert_eq!(switcher.documents()[0], docs[0]);
    }

    #[test]
    fn hot_swap_reseeds_from_host() {
        let (panel, docs) = panel_with(&["A", "B"]);
        let registry = PolicyRegistry::new();
        let mut switcher = TabSwitcher::new(panel, &registry, Some("open_order"));

        // C is announced but not yet delivered when the swap happens
        let c = open(&mut switcher, "C");
        let kind = switcher.set_policy_by_id(&registry, "most_recently_used");
        switcher.tick();

        assert_eq!(kind, PolicyKind::MostRecentlyUsed);
        let mut seeded = switcher.documents();
        seeded.sort();
        assert_eq!(seeded, vec![docs[0], docs[1], c]);
        assert_eq!(switcher.documents()[0], c);
    }

    #[test]
    fn dispose_unhooks_everything_and_is_idempotent() {
        let (panel, _) = panel_with(&["A", "B"]);
        let mut switcher = TabSwitcher::new(panel, &PolicyRegistry::new(), None);

        switcher.dispose();
        switcher.dispose();

        assert!(switcher.is_disposed());
        assert_eq!(switcher.workspace().subscriber_count(), 0);
        assert_eq!(switcher.workspace().close_hook_count(), 0);
        assert!(!switcher.move_next());
    }
}

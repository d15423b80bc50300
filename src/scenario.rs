//! Scripted workspace scenarios.
//!
//! A scenario describes panes, the documents opened into them, and a list of
//! steps to replay through a [`TabSwitcher`]. Each step produces a
//! [`TraceEntry`] with the active document and the policy's ordering, which
//! makes it easy to see what a policy does with a given layout.
//!
//! ```yaml
//! strategy: most_recently_used
//! panes:
//!   - name: left
//!     top: 0
//!     left: 0
//!     documents: [A, B]
//!   - name: right
//!     top: 0
//!     left: 400
//!     documents: [C]
//!     tool_windows: [Output]
//! steps:
//!   - next
//!   - activate: B
//!   - open: { name: D, pane: right }
//!   - close: A
//!   - policy: open_order
//!   - previous
//! ```
//!
//! Documents are opened pane by pane in the order they are listed.

use crate::document::{DockState, DocumentId};
use crate::policy::PolicyRegistry;
use crate::switcher::TabSwitcher;
use crate::workspace::{DockPanel, PaneId, Workspace};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or replaying a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario YAML: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    #[error("pane '{0}' is declared more than once")]
    DuplicatePane(String),

    #[error("step {step}: unknown pane '{name}'")]
    UnknownPane { step: usize, name: String },

    #[error("step {step}: unknown document '{name}'")]
    UnknownDocument { step: usize, name: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaneSpec {
    pub name: String,
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub documents: Vec<String>,
    /// Content docked into the pane that does not take part in switching
    #[serde(default)]
    pub tool_windows: Vec<String>,
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Next,
    Previous,
    /// User activates a document directly (e.g. clicks its tab)
    Activate(String),
    Open { name: String, pane: String },
    Close(String),
    /// Undock a document into a floating window
    Float(String),
    /// Hot-swap the active policy
    Policy(String),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Next => write!(f, "next"),
            Step::Previous => write!(f, "previous"),
            Step::Activate(name) => write!(f, "activate {name}"),
            Step::Open { name, pane } => write!(f, "open {name} in {pane}"),
            Step::Close(name) => write!(f, "close {name}"),
            Step::Float(name) => write!(f, "float {name}"),
            Step::Policy(id) => write!(f, "policy {id}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Policy identifier; resolved softly like the persisted config value
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub panes: Vec<PaneSpec>,
    #[serde(default, with = "serde_yaml_ng::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

/// State after one replayed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// Step description; `start` for the initial state
    pub step: String,
    /// Result of next/previous; `None` for other steps
    pub switched: Option<bool>,
    pub active: Option<String>,
    pub order: Vec<String>,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<24}", self.step)?;
        if let Some(switched) = self.switched {
            write!(f, " switched={:<5}", switched)?;
        }
        write!(
            f,
            " active={} order=[{}]",
            self.active.as_deref().unwrap_or("-"),
            self.order.join(", ")
        )
    }
}

impl Scenario {
    pub fn from_yaml(contents: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Replay the scenario and return one trace entry per step, preceded by
    /// the initial state
    ///
    /// `strategy` overrides the scenario's own policy identifier.
    pub fn run(
        &self,
        registry: &PolicyRegistry,
        strategy: Option<&str>,
    ) -> Result<Vec<TraceEntry>, ScenarioError> {
        let mut panel = DockPanel::new();
        let mut panes: HashMap<&str, PaneId> = HashMap::new();

        for spec in &self.panes {
            if panes.contains_key(spec.name.as_str()) {
                return Err(ScenarioError::DuplicatePane(spec.name.clone()));
            }
            let id = panel.add_pane(spec.top, spec.left);
            panes.insert(spec.name.as_str(), id);
        }
        for spec in &self.panes {
            let pane = panes[spec.name.as_str()];
            for name in &spec.documents {
                panel.open_document(name, pane);
            }
            for name in &spec.tool_windows {
                panel.open_tool_window(name, pane, DockState::DockSide);
            }
        }

        let strategy = strategy.or(self.strategy.as_deref());
        let mut switcher = TabSwitcher::new(panel, registry, strategy);
        let mut trace = vec![snapshot(&switcher, "start".to_string(), None)];

        for (idx, step) in self.steps.iter().enumerate() {
            let number = idx + 1;
            let mut switched = None;
            match step {
                Step::Next => switched = Some(switcher.move_next()),
                Step::Previous => switched = Some(switcher.move_previous()),
                Step::Activate(name) => {
                    let doc = find_document(&switcher, number, name)?;
                    switcher.workspace_mut().activate(doc);
                }
                Step::Open { name, pane } => {
                    let pane_id = panes.get(pane.as_str()).copied().ok_or_else(|| {
                        ScenarioError::UnknownPane {
                            step: number,
                            name: pane.clone(),
                        }
                    })?;
                    switcher.workspace_mut().open_document(name, pane_id);
                }
                Step::Close(name) => {
                    let doc = find_document(&switcher, number, name)?;
                    switcher.workspace_mut().close_document(doc);
                }
                Step::Float(name) => {
                    let doc = find_document(&switcher, number, name)?;
                    switcher.workspace_mut().set_dock_state(doc, DockState::Float);
                }
                Step::Policy(id) => {
                    switcher.set_policy_by_id(registry, id);
                }
            }
            // One host event-loop iteration per step
            switcher.tick();
            trace.push(snapshot(&switcher, step.to_string(), switched));
        }

        Ok(trace)
    }
}

fn find_document(
    switcher: &TabSwitcher<DockPanel>,
    step: usize,
    name: &str,
) -> Result<DocumentId, ScenarioError> {
    switcher
        .workspace()
        .find_by_text(name)
        .ok_or_else(|| ScenarioError::UnknownDocument {
            step,
            name: name.to_string(),
        })
}

fn snapshot(switcher: &TabSwitcher<DockPanel>, step: String, switched: Option<bool>) -> TraceEntry {
    let workspace = switcher.workspace();
    let text = |doc: DocumentId| workspace.document_text(doc).unwrap_or_else(|| doc.to_string());
    TraceEntry {
        step,
        switched,
        active: workspace.active_document().map(text),
        order: switcher.documents().into_iter().map(text).collect(),
    }
}

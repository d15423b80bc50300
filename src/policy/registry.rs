//! Registry of available ordering policies.

use super::{OrderingPolicy, PolicyError, PolicyKind};

/// Identifier and display text for one registered policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDescriptor {
    pub kind: PolicyKind,
    pub id: &'static str,
    pub description: &'static str,
}

impl From<PolicyKind> for PolicyDescriptor {
    fn from(kind: PolicyKind) -> Self {
        Self {
            kind,
            id: kind.id(),
            description: kind.description(),
        }
    }
}

/// Ordered list of available policies, resolved by persisted identifier.
///
/// Built once and passed to whoever needs to list or resolve policies.
/// Resolution never fails: unknown identifiers log an error and fall back to
/// the first registered policy.
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    descriptors: Vec<PolicyDescriptor>,
}

impl PolicyRegistry {
    /// Build the registry with every built-in policy in registration order
    pub fn new() -> Self {
        let descriptors: Vec<PolicyDescriptor> = PolicyKind::all()
            .iter()
            .copied()
            .map(PolicyDescriptor::from)
            .collect();
        log::debug!("Registered {} tab switch policies", descriptors.len());
        Self { descriptors }
    }

    /// Registered policies in order
    pub fn list(&self) -> &[PolicyDescriptor] {
        &self.descriptors
    }

    /// The policy used when nothing else can be resolved
    pub fn default_kind(&self) -> PolicyKind {
        self.descriptors
            .first()
            .map(|d| d.kind)
            .unwrap_or(PolicyKind::VisualOrder)
    }

    /// Strict lookup of a registered identifier
    pub fn lookup(&self, id: &str) -> Result<PolicyKind, PolicyError> {
        let trimmed = id.trim();
        self.descriptors
            .iter()
            .find(|d| d.id == trimmed)
            .map(|d| d.kind)
            .ok_or_else(|| PolicyError::UnknownPolicy(id.to_string()))
    }

    /// Resolve an identifier to the kind that will be used, defaulting softly
    pub fn resolve_kind(&self, id: &str) -> PolicyKind {
        match self.lookup(id) {
            Ok(kind) => kind,
            Err(e) => {
                let fallback = self.default_kind();
                log::error!("Error parsing strategy, defaulting to {}: {}", fallback, e);
                fallback
            }
        }
    }

    /// Resolve an identifier to a fresh, uninitialized policy instance
    pub fn resolve(&self, id: &str) -> Box<dyn OrderingPolicy> {
        self.resolve_kind(id).create()
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

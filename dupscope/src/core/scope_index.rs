//! Frozen index of live `(scope, name)` keys.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::core::error::InventoryFetchError;
use crate::core::ports::InventoryClient;
use crate::core::rule::Rule;
use crate::core::types::{AccountAttribute, InventoryEntry, InventoryResource};

/// Set of `scope + separator + name` keys plus the account default scope.
///
/// Built once per pass and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeIndex {
    keys: HashSet<String>,
    default_scope: Option<String>,
}

impl ScopeIndex {
    /// Index `resources` and pick the default scope from `attributes`.
    pub fn new(
        rule: &Rule,
        resources: &[InventoryResource],
        attributes: &[AccountAttribute],
    ) -> Self {
        let keys = resources
            .iter()
            .map(InventoryEntry::from)
            .map(|entry| {
                let scope = entry.scope.key_value(&rule.unpartitioned_scope);
                rule.key(scope, &entry.name)
            })
            .collect();
        let default_scope = attributes
            .iter()
            .find(|attr| attr.name == rule.default_scope_attribute)
            .and_then(|attr| attr.values.first().cloned());
        Self {
            keys,
            default_scope,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Default scope from account attributes; `None` when unknown.
    pub fn default_scope(&self) -> Option<&str> {
        self.default_scope.as_deref()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Outcome of the build phase.
#[derive(Debug)]
pub enum IndexBuild {
    Complete(ScopeIndex),
    /// The inventory could not be read; `index` must not be trusted for absence.
    Degraded {
        index: ScopeIndex,
        reason: InventoryFetchError,
    },
}

impl IndexBuild {
    pub fn index(&self) -> &ScopeIndex {
        match self {
            IndexBuild::Complete(index) | IndexBuild::Degraded { index, .. } => index,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, IndexBuild::Degraded { .. })
    }

    pub fn degraded_reason(&self) -> Option<&InventoryFetchError> {
        match self {
            IndexBuild::Complete(_) => None,
            IndexBuild::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Fetch the inventory and build the index.
///
/// Both fetches must succeed before any key is inserted, so a failure yields
/// an empty index and an unknown default scope. No retries.
pub fn build_index<C: InventoryClient + ?Sized>(rule: &Rule, client: &C) -> IndexBuild {
    let resources = match client.fetch_existing_resources() {
        Ok(resources) => resources,
        Err(err) => return degraded(InventoryFetchError::Resources(err)),
    };
    let attributes = match client.fetch_account_attributes() {
        Ok(attributes) => attributes,
        Err(err) => return degraded(InventoryFetchError::AccountAttributes(err)),
    };

    let index = ScopeIndex::new(rule, &resources, &attributes);
    debug!(
        keys = index.len(),
        default_scope = ?index.default_scope(),
        "scope index built"
    );
    IndexBuild::Complete(index)
}

fn degraded(reason: InventoryFetchError) -> IndexBuild {
    warn!(error = %reason, "inventory fetch failed; duplicate name check disabled");
    IndexBuild::Degraded {
        index: ScopeIndex::default(),
        reason,
    }
}

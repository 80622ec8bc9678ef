//! Deployment state recorded by a prior apply.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ports::{Attributes, StateStore};

/// One resource accepted by a prior deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: Attributes,
}

/// State document (`{"resources": [...]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentState {
    #[serde(default)]
    resources: Vec<StateRecord>,
}

impl DeploymentState {
    pub fn new(resources: Vec<StateRecord>) -> Self {
        Self { resources }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl StateStore for DeploymentState {
    fn exists(&self, kind: &str, id: &str, predicate: &dyn Fn(&Attributes) -> bool) -> bool {
        self.resources
            .iter()
            .any(|record| record.kind == kind && record.id == id && predicate(&record.attributes))
    }
}

/// Load state from a JSON file.
///
/// A missing file means nothing has been deployed yet.
pub fn load_state(path: &Path) -> Result<DeploymentState> {
    if !path.exists() {
        debug!(path = %path.display(), "no state file; using empty state");
        return Ok(DeploymentState::default());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read state {}", path.display()))?;
    let state: DeploymentState = serde_json::from_str(&contents)
        .with_context(|| format!("parse state {}", path.display()))?;
    debug!(path = %path.display(), records = state.len(), "state loaded");
    Ok(state)
}

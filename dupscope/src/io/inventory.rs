//! Inventory client backed by a JSON snapshot of the live environment.
//!
//! The snapshot is read lazily on the first fetch and cached, so both fetches
//! of one build see the same document. A missing or malformed file surfaces
//! as a fetch failure of the build phase, never as a startup error.

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ports::InventoryClient;
use crate::core::types::{AccountAttribute, InventoryResource};

/// Snapshot document.
///
/// ```json
/// {
///   "resources": [{"name": "web-sg", "scope": "vpc-1"}, {"name": "classic"}],
///   "account_attributes": [{"name": "default-vpc", "values": ["vpc-1"]}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub resources: Option<Vec<InventoryResource>>,
    pub account_attributes: Option<Vec<AccountAttribute>>,
}

/// Inventory client over one snapshot file. Create one per detection pass.
#[derive(Debug)]
pub struct SnapshotInventory {
    path: PathBuf,
    /// Parsed snapshot, or the rendered read/parse error.
    snapshot: OnceLock<Result<InventorySnapshot, String>>,
}

impl SnapshotInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: OnceLock::new(),
        }
    }

    fn snapshot(&self) -> Result<&InventorySnapshot> {
        self.snapshot
            .get_or_init(|| self.read().map_err(|err| format!("{err:#}")))
            .as_ref()
            .map_err(|msg| anyhow!("{msg}"))
    }

    fn read(&self) -> Result<InventorySnapshot> {
        debug!(path = %self.path.display(), "reading inventory snapshot");
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("read inventory {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parse inventory {}", self.path.display()))
    }
}

impl InventoryClient for SnapshotInventory {
    fn fetch_existing_resources(&self) -> Result<Vec<InventoryResource>> {
        self.snapshot()?
            .resources
            .clone()
            .ok_or_else(|| anyhow!("inventory {} has no resources", self.path.display()))
    }

    fn fetch_account_attributes(&self) -> Result<Vec<AccountAttribute>> {
        self.snapshot()?.account_attributes.clone().ok_or_else(|| {
            anyhow!(
                "inventory {} has no account_attributes",
                self.path.display()
            )
        })
    }
}

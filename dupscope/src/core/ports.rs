//! Interfaces of the collaborators the detector core consumes.
//!
//! Implementations backed by files live in [`crate::io`]; tests use the fakes
//! in `test_support`.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::core::types::{AccountAttribute, InventoryResource};

/// Queries the live environment.
pub trait InventoryClient {
    /// All existing resources of the checked kind.
    fn fetch_existing_resources(&self) -> Result<Vec<InventoryResource>>;
    /// Account-level attributes, including the default scope attribute.
    fn fetch_account_attributes(&self) -> Result<Vec<AccountAttribute>>;
}

/// Resolves a raw configuration token into a concrete string.
pub trait ExpressionEvaluator {
    fn evaluate(&self, raw: &str) -> Result<String>;
}

/// Recorded attributes of a resource in deployment state.
pub type Attributes = BTreeMap<String, String>;

/// Resources accepted by a prior deployment.
pub trait StateStore {
    /// True if a record of `kind`/`id` exists whose attributes satisfy `predicate`.
    fn exists(&self, kind: &str, id: &str, predicate: &dyn Fn(&Attributes) -> bool) -> bool;
}

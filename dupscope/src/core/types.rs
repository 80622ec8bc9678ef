//! Shared deterministic types for the detector core.
//!
//! These types define stable contracts between core components. They hold no
//! handles to external state and are cheap to share across threads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Grouping boundary of a live resource.
///
/// Inventory entries either live inside a partition (e.g. a VPC) or outside
/// any partition. The conversion from the inventory's optional partition id
/// happens once, in [`Scope::from_partition`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Partition(String),
    Unpartitioned,
}

impl Scope {
    /// Empty partition ids are treated the same as a missing one.
    pub fn from_partition(partition: Option<&str>) -> Self {
        match partition {
            Some(id) if !id.is_empty() => Scope::Partition(id.to_string()),
            _ => Scope::Unpartitioned,
        }
    }

    /// Scope value used in index keys. `sentinel` names the unpartitioned scope.
    pub fn key_value<'a>(&'a self, sentinel: &'a str) -> &'a str {
        match self {
            Scope::Partition(id) => id,
            Scope::Unpartitioned => sentinel,
        }
    }
}

/// Live resource as returned by an inventory client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryResource {
    pub name: String,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Account-level attribute (e.g. `default-vpc`) with its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAttribute {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Normalized inventory entry stored in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub scope: Scope,
    pub name: String,
}

impl From<&InventoryResource> for InventoryEntry {
    fn from(resource: &InventoryResource) -> Self {
        Self {
            scope: Scope::from_partition(resource.scope.as_deref()),
            name: resource.name.clone(),
        }
    }
}

/// Source location of a configuration token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    pub file: String,
    pub line: u32,
}

/// Raw configuration value, possibly containing interpolations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub text: String,
    pub pos: Pos,
}

/// Configuration-time view of a resource under check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredResource {
    /// Resource kind, e.g. `aws_security_group`.
    pub kind: String,
    /// Identifier of the resource within its kind (e.g. `web`).
    pub id: String,
    pub fields: BTreeMap<String, Expression>,
}

impl DeclaredResource {
    /// Raw expression for `name`, if the field is declared.
    pub fn field(&self, name: &str) -> Option<&Expression> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Notice,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
        };
        f.write_str(label)
    }
}

/// A single reported violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub detector: String,
    pub severity: Severity,
    pub message: String,
    pub line: u32,
    pub file: String,
}

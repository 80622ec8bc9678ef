//! Test-only fakes for detector collaborators and resource builders.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Result, anyhow};

use crate::core::ports::{Attributes, ExpressionEvaluator, InventoryClient};
use crate::core::types::{AccountAttribute, DeclaredResource, Expression, InventoryResource, Pos};
use crate::io::state::StateRecord;

/// Resource kind used by the builders below.
pub const SECURITY_GROUP: &str = "aws_security_group";

/// Live inventory entry; `scope: None` means outside any partition.
pub fn live(name: &str, scope: Option<&str>) -> InventoryResource {
    InventoryResource {
        name: name.to_string(),
        scope: scope.map(str::to_string),
    }
}

pub fn attribute(name: &str, values: &[&str]) -> AccountAttribute {
    AccountAttribute {
        name: name.to_string(),
        values: values.iter().map(|value| value.to_string()).collect(),
    }
}

/// Declared security group with `name` on line 2 and optional `vpc_id` on line 3 of `main.tf`.
pub fn declared(id: &str, name: &str, vpc_id: Option<&str>) -> DeclaredResource {
    let mut fields = BTreeMap::new();
    fields.insert("name".to_string(), expression(name, 2));
    if let Some(vpc_id) = vpc_id {
        fields.insert("vpc_id".to_string(), expression(vpc_id, 3));
    }
    DeclaredResource {
        kind: SECURITY_GROUP.to_string(),
        id: id.to_string(),
        fields,
    }
}

fn expression(text: &str, line: u32) -> Expression {
    Expression {
        text: text.to_string(),
        pos: Pos {
            file: "main.tf".to_string(),
            line,
        },
    }
}

/// State record of a security group already applied with `vpc_id` and `name`.
pub fn tracked(id: &str, vpc_id: &str, name: &str) -> StateRecord {
    let mut attributes = Attributes::new();
    attributes.insert("vpc_id".to_string(), vpc_id.to_string());
    attributes.insert("name".to_string(), name.to_string());
    StateRecord {
        kind: SECURITY_GROUP.to_string(),
        id: id.to_string(),
        attributes,
    }
}

/// Inventory client returning fixed data.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    resources: Vec<InventoryResource>,
    attributes: Vec<AccountAttribute>,
}

impl StaticInventory {
    pub fn new(resources: Vec<InventoryResource>, attributes: Vec<AccountAttribute>) -> Self {
        Self {
            resources,
            attributes,
        }
    }
}

impl InventoryClient for StaticInventory {
    fn fetch_existing_resources(&self) -> Result<Vec<InventoryResource>> {
        Ok(self.resources.clone())
    }

    fn fetch_account_attributes(&self) -> Result<Vec<AccountAttribute>> {
        Ok(self.attributes.clone())
    }
}

/// Inventory client whose resource or attribute fetch fails.
#[derive(Debug, Clone)]
pub struct FailingInventory {
    fail_resources: bool,
}

impl FailingInventory {
    pub fn resources() -> Self {
        Self {
            fail_resources: true,
        }
    }

    /// Resource fetch succeeds with one entry; attribute fetch fails.
    pub fn attributes() -> Self {
        Self {
            fail_resources: false,
        }
    }
}

impl InventoryClient for FailingInventory {
    fn fetch_existing_resources(&self) -> Result<Vec<InventoryResource>> {
        if self.fail_resources {
            return Err(anyhow!("connection refused"));
        }
        Ok(vec![live("web-sg", Some("vpc-1"))])
    }

    fn fetch_account_attributes(&self) -> Result<Vec<AccountAttribute>> {
        Err(anyhow!("request throttled"))
    }
}

/// Evaluator with fixed answers.
///
/// Raw text without `${` evaluates to itself; any other unmapped text fails.
#[derive(Debug, Clone, Default)]
pub struct MapEvaluator {
    values: HashMap<String, String>,
}

impl MapEvaluator {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(raw, value)| (raw.to_string(), value.to_string()))
                .collect(),
        }
    }
}

impl ExpressionEvaluator for MapEvaluator {
    fn evaluate(&self, raw: &str) -> Result<String> {
        if let Some(value) = self.values.get(raw) {
            return Ok(value.clone());
        }
        if raw.contains("${") {
            return Err(anyhow!("cannot evaluate {raw}"));
        }
        Ok(raw.to_string())
    }
}

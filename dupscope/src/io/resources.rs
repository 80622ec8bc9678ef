//! Declared resources read from a JSON document.
//!
//! The document is checked against the bundled JSON Schema before it is
//! deserialized, so structural mistakes are reported all at once.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::types::{DeclaredResource, Expression, Pos};

pub const RESOURCES_SCHEMA: &str = include_str!("../../schemas/declared_resources.schema.json");

#[derive(Debug, Deserialize)]
struct ResourcesDocument {
    resources: Vec<ResourceEntry>,
}

#[derive(Debug, Deserialize)]
struct ResourceEntry {
    kind: String,
    id: String,
    file: String,
    fields: BTreeMap<String, FieldEntry>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    value: String,
    line: u32,
}

impl From<ResourceEntry> for DeclaredResource {
    fn from(entry: ResourceEntry) -> Self {
        let fields = entry
            .fields
            .into_iter()
            .map(|(name, field)| {
                let expr = Expression {
                    text: field.value,
                    pos: Pos {
                        file: entry.file.clone(),
                        line: field.line,
                    },
                };
                (name, expr)
            })
            .collect();
        Self {
            kind: entry.kind,
            id: entry.id,
            fields,
        }
    }
}

/// Load and validate declared resources from `path`.
pub fn load_resources(path: &Path) -> Result<Vec<DeclaredResource>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read resources {}", path.display()))?;
    let resources = parse_resources(&contents)
        .with_context(|| format!("load resources {}", path.display()))?;
    debug!(path = %path.display(), count = resources.len(), "declared resources loaded");
    Ok(resources)
}

/// Parse a resources document from JSON text.
pub fn parse_resources(contents: &str) -> Result<Vec<DeclaredResource>> {
    let value: Value = serde_json::from_str(contents).context("parse resources json")?;
    validate_schema(&value)?;
    let document: ResourcesDocument =
        serde_json::from_value(value).context("deserialize resources")?;
    Ok(document
        .resources
        .into_iter()
        .map(DeclaredResource::from)
        .collect())
}

fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value =
        serde_json::from_str(RESOURCES_SCHEMA).context("parse resources schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        return Err(anyhow!(
            "resources schema validation failed:\n- {}",
            messages.join("\n- ")
        ));
    }
    Ok(())
}

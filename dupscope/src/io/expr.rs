//! Expression evaluator for configuration tokens.
//!
//! Supports literal text and `${var.NAME}` interpolation from a variables
//! file. Anything else inside `${...}` (resource references, function calls)
//! is reported as unresolvable so the resource is skipped instead of guessed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use tracing::debug;

use crate::core::ports::ExpressionEvaluator;

static INTERPOLATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{\s*([^}]*?)\s*\}").unwrap());
static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^var\.([A-Za-z_][A-Za-z0-9_-]*)$").unwrap());

/// Resolves `${var.NAME}` from a fixed set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableEvaluator {
    variables: BTreeMap<String, String>,
}

impl VariableEvaluator {
    pub fn new(variables: BTreeMap<String, String>) -> Self {
        Self { variables }
    }

    /// Load variables from a TOML file of top-level `name = value` pairs.
    ///
    /// Strings are used verbatim; integers, floats and booleans are rendered.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read vars {}", path.display()))?;
        let table: toml::Table =
            toml::from_str(&contents).with_context(|| format!("parse vars {}", path.display()))?;
        let mut variables = BTreeMap::new();
        for (name, value) in table {
            let rendered = match value {
                toml::Value::String(text) => text,
                toml::Value::Integer(number) => number.to_string(),
                toml::Value::Float(number) => number.to_string(),
                toml::Value::Boolean(flag) => flag.to_string(),
                other => bail!(
                    "variable '{name}' in {} must be a scalar, found {}",
                    path.display(),
                    other.type_str()
                ),
            };
            variables.insert(name, rendered);
        }
        debug!(path = %path.display(), count = variables.len(), "variables loaded");
        Ok(Self { variables })
    }
}

impl ExpressionEvaluator for VariableEvaluator {
    fn evaluate(&self, raw: &str) -> Result<String> {
        let mut out = String::with_capacity(raw.len());
        let mut last = 0;
        for caps in INTERPOLATION_RE.captures_iter(raw) {
            let whole = caps.get(0).ok_or_else(|| anyhow!("empty interpolation match"))?;
            let inner = &caps[1];
            let name = VARIABLE_RE
                .captures(inner)
                .map(|var| var[1].to_string())
                .ok_or_else(|| anyhow!("unresolvable expression ${{{inner}}}"))?;
            let value = self
                .variables
                .get(&name)
                .ok_or_else(|| anyhow!("unknown variable '{name}'"))?;
            out.push_str(&raw[last..whole.start()]);
            out.push_str(value);
            last = whole.end();
        }
        let rest = &raw[last..];
        if rest.contains("${") {
            bail!("unterminated interpolation in '{raw}'");
        }
        out.push_str(rest);
        Ok(out)
    }
}

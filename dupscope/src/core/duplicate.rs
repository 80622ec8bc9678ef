//! Duplicate decision for a single declared resource.

use anyhow::Result;
use tracing::debug;

use crate::core::ports::{Attributes, ExpressionEvaluator, StateStore};
use crate::core::rule::Rule;
use crate::core::scope_index::ScopeIndex;
use crate::core::types::{DeclaredResource, Finding};

/// Decide whether `resource`, resolved into `scope`, collides with a live resource.
///
/// Returns `Ok(None)` when:
/// - the resource declares no name field,
/// - `scope` is empty (default scope unknown, nothing to compare against),
/// - the key is absent from the index,
/// - state already tracks this resource with the same scope and name.
///
/// Name evaluation failures are returned to the caller, which skips the resource.
pub fn evaluate_duplicate<E, S>(
    rule: &Rule,
    index: &ScopeIndex,
    evaluator: &E,
    state: &S,
    resource: &DeclaredResource,
    scope: &str,
) -> Result<Option<Finding>>
where
    E: ExpressionEvaluator + ?Sized,
    S: StateStore + ?Sized,
{
    let Some(name_expr) = resource.field(&rule.name_field) else {
        debug!(kind = %resource.kind, id = %resource.id, "no name declared");
        return Ok(None);
    };
    let name = evaluator.evaluate(&name_expr.text)?;

    if scope.is_empty() {
        debug!(id = %resource.id, %name, "scope unknown; skipping duplicate check");
        return Ok(None);
    }

    let key = rule.key(scope, &name);
    if !index.contains(&key) {
        return Ok(None);
    }

    let same_resource = |attributes: &Attributes| {
        attributes.get(&rule.scope_field).map(String::as_str) == Some(scope)
            && attributes.get(&rule.name_field).map(String::as_str) == Some(name.as_str())
    };
    if state.exists(&resource.kind, &resource.id, &same_resource) {
        debug!(id = %resource.id, %key, "live match is this resource's own state");
        return Ok(None);
    }

    Ok(Some(Finding {
        detector: rule.name.clone(),
        severity: rule.severity,
        message: rule.duplicate_message(&name),
        line: name_expr.pos.line,
        file: name_expr.pos.file.clone(),
    }))
}

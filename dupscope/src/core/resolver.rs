//! Effective scope of a declared resource.

use anyhow::Result;

use crate::core::ports::ExpressionEvaluator;
use crate::core::rule::Rule;
use crate::core::scope_index::ScopeIndex;
use crate::core::types::DeclaredResource;

/// Resolve the scope `resource` is checked in.
///
/// - An explicit scope override is evaluated; evaluator errors propagate as-is.
/// - Otherwise the index default scope is returned verbatim. An unknown
///   default yields the empty string.
pub fn resolve_scope<E: ExpressionEvaluator + ?Sized>(
    rule: &Rule,
    index: &ScopeIndex,
    evaluator: &E,
    resource: &DeclaredResource,
) -> Result<String> {
    match resource.field(&rule.scope_field) {
        Some(expr) => evaluator.evaluate(&expr.text),
        None => Ok(index.default_scope().unwrap_or_default().to_string()),
    }
}

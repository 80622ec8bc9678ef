//! Parameters of a same-kind name uniqueness rule.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::types::Severity;

/// Describes which resource kind is checked and how its name and scope are read.
///
/// Defaults describe the security group rule: names must be unique per VPC,
/// security groups outside a VPC (EC2-Classic) share the `none` scope, and
/// the account attribute `default-vpc` provides the VPC for resources that
/// do not set `vpc_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Rule {
    /// Detector name reported on findings.
    pub name: String,
    /// Resource kind checked by this rule.
    pub target: String,
    /// Severity of emitted findings.
    pub severity: Severity,
    /// Field holding the resource name.
    pub name_field: String,
    /// Optional field overriding the scope.
    pub scope_field: String,
    /// Account attribute whose first value is the default scope.
    pub default_scope_attribute: String,
    /// Scope value of live resources outside any partition.
    pub unpartitioned_scope: String,
    /// Joins scope and name in index keys.
    pub separator: String,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            name: "aws_security_group_duplicate_name".to_string(),
            target: "aws_security_group".to_string(),
            severity: Severity::Error,
            name_field: "name".to_string(),
            scope_field: "vpc_id".to_string(),
            default_scope_attribute: "default-vpc".to_string(),
            unpartitioned_scope: "none".to_string(),
            separator: ".".to_string(),
        }
    }
}

impl Rule {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("rule.name", &self.name),
            ("rule.target", &self.target),
            ("rule.name_field", &self.name_field),
            ("rule.scope_field", &self.scope_field),
            ("rule.default_scope_attribute", &self.default_scope_attribute),
            ("rule.unpartitioned_scope", &self.unpartitioned_scope),
            ("rule.separator", &self.separator),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(anyhow!("{label} must be non-empty"));
            }
        }
        if self.name_field == self.scope_field {
            return Err(anyhow!("rule.name_field and rule.scope_field must differ"));
        }
        Ok(())
    }

    /// Composite index key for `(scope, name)`.
    pub fn key(&self, scope: &str, name: &str) -> String {
        format!("{scope}{}{name}", self.separator)
    }

    pub fn duplicate_message(&self, name: &str) -> String {
        format!("\"{name}\" is duplicate name. It must be unique.")
    }
}

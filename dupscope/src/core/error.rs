//! Failure taxonomy of a detection pass.
//!
//! None of these abort a pass. Fetch failures degrade the whole run; the
//! per-resource variants only skip the affected resource.

use thiserror::Error;

/// The live inventory could not be read.
#[derive(Debug, Error)]
pub enum InventoryFetchError {
    #[error("fetch existing resources: {0:#}")]
    Resources(anyhow::Error),
    #[error("fetch account attributes: {0:#}")]
    AccountAttributes(anyhow::Error),
}

/// Why a declared resource was skipped without a finding.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("resolve scope of {resource}: {source:#}")]
    ScopeResolution {
        resource: String,
        source: anyhow::Error,
    },
    #[error("evaluate name of {resource}: {source:#}")]
    NameEvaluation {
        resource: String,
        source: anyhow::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn messages_include_resource_and_cause() {
        let err = SkipReason::NameEvaluation {
            resource: "aws_security_group.web".to_string(),
            source: anyhow!("unknown variable 'name'"),
        };
        assert_eq!(
            err.to_string(),
            "evaluate name of aws_security_group.web: unknown variable 'name'"
        );
    }
}

//! Two-phase duplicate name detection.
//!
//! [`Detector::build`] fetches the inventory exactly once and freezes the
//! resulting index. Evaluation then only reads that index, so `detect` can be
//! called for any number of resources, in any order, from any number of
//! threads.

use tracing::{debug, info, warn};

use crate::core::duplicate::evaluate_duplicate;
use crate::core::error::SkipReason;
use crate::core::ports::{ExpressionEvaluator, InventoryClient, StateStore};
use crate::core::resolver::resolve_scope;
use crate::core::rule::Rule;
use crate::core::scope_index::{IndexBuild, build_index};
use crate::core::types::{DeclaredResource, Finding};

/// Detector bound to one frozen index and its collaborators.
pub struct Detector<'a, E: ?Sized, S: ?Sized> {
    rule: &'a Rule,
    build: IndexBuild,
    evaluator: &'a E,
    state: &'a S,
}

/// Aggregate result of evaluating a batch of resources.
#[derive(Debug, Default)]
pub struct DetectionReport {
    pub findings: Vec<Finding>,
    /// Resources of the target kind that could not be evaluated.
    pub skipped: Vec<SkipReason>,
    /// Number of resources of the target kind that were considered.
    pub checked: usize,
}

impl<'a, E, S> Detector<'a, E, S>
where
    E: ExpressionEvaluator + ?Sized,
    S: StateStore + ?Sized,
{
    /// Run the build phase against `client`.
    pub fn build<C: InventoryClient + ?Sized>(
        rule: &'a Rule,
        client: &C,
        evaluator: &'a E,
        state: &'a S,
    ) -> Self {
        Self {
            rule,
            build: build_index(rule, client),
            evaluator,
            state,
        }
    }

    /// Build status; `Degraded` means results of this run may be under-reported.
    pub fn status(&self) -> &IndexBuild {
        &self.build
    }

    /// Evaluate one resource.
    ///
    /// Resources of other kinds, resources without a name field, and every
    /// resource of a degraded run yield `Ok(None)`.
    pub fn check(&self, resource: &DeclaredResource) -> Result<Option<Finding>, SkipReason> {
        if resource.kind != self.rule.target || self.build.is_degraded() {
            return Ok(None);
        }
        if resource.field(&self.rule.name_field).is_none() {
            debug!(resource = %address(resource), "no name declared");
            return Ok(None);
        }
        let index = self.build.index();
        let scope = resolve_scope(self.rule, index, self.evaluator, resource).map_err(|source| {
            SkipReason::ScopeResolution {
                resource: address(resource),
                source,
            }
        })?;
        evaluate_duplicate(
            self.rule,
            index,
            self.evaluator,
            self.state,
            resource,
            &scope,
        )
        .map_err(|source| SkipReason::NameEvaluation {
            resource: address(resource),
            source,
        })
    }

    /// Evaluate one resource, appending any finding to `findings`.
    ///
    /// Evaluation failures are logged and the resource is skipped.
    pub fn detect(&self, resource: &DeclaredResource, findings: &mut Vec<Finding>) {
        match self.check(resource) {
            Ok(Some(finding)) => {
                debug!(resource = %address(resource), message = %finding.message, "duplicate name");
                findings.push(finding);
            }
            Ok(None) => {}
            Err(reason) => warn!(error = %reason, "skipping resource"),
        }
    }

    /// Evaluate every resource in `resources`.
    pub fn detect_all(&self, resources: &[DeclaredResource]) -> DetectionReport {
        let mut report = DetectionReport::default();
        for resource in resources {
            if resource.kind != self.rule.target {
                continue;
            }
            report.checked += 1;
            match self.check(resource) {
                Ok(Some(finding)) => report.findings.push(finding),
                Ok(None) => {}
                Err(reason) => {
                    warn!(error = %reason, "skipping resource");
                    report.skipped.push(reason);
                }
            }
        }
        info!(
            detector = %self.rule.name,
            checked = report.checked,
            findings = report.findings.len(),
            skipped = report.skipped.len(),
            degraded = self.build.is_degraded(),
            "detection pass finished"
        );
        report
    }
}

fn address(resource: &DeclaredResource) -> String {
    format!("{}.{}", resource.kind, resource.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::state::DeploymentState;
    use crate::test_support::{
        FailingInventory, MapEvaluator, StaticInventory, attribute, declared, live,
    };

    fn inventory() -> StaticInventory {
        StaticInventory::new(
            vec![live("web-sg", Some("vpc-1"))],
            vec![attribute("default-vpc", &["vpc-1"])],
        )
    }

    #[test]
    fn detects_default_scope_collision_and_ignores_other_scope() {
        let rule = Rule::default();
        let evaluator = MapEvaluator::default();
        let state = DeploymentState::default();
        let detector = Detector::build(&rule, &inventory(), &evaluator, &state);

        let mut findings = Vec::new();
        detector.detect(&declared("a", "web-sg", None), &mut findings);
        detector.detect(&declared("b", "web-sg", Some("vpc-2")), &mut findings);

        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("\"web-sg\""));
    }

    #[test]
    fn other_kinds_are_not_checked() {
        let rule = Rule::default();
        let evaluator = MapEvaluator::default();
        let state = DeploymentState::default();
        let detector = Detector::build(&rule, &inventory(), &evaluator, &state);

        let mut resource = declared("a", "web-sg", None);
        resource.kind = "aws_instance".to_string();
        let report = detector.detect_all(&[resource]);
        assert_eq!(report.checked, 0);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn degraded_build_reports_nothing() {
        let rule = Rule::default();
        let evaluator = MapEvaluator::default();
        let state = DeploymentState::default();
        let detector = Detector::build(&rule, &FailingInventory::attributes(), &evaluator, &state);

        let report = detector.detect_all(&[declared("a", "web-sg", None)]);
        assert!(detector.status().is_degraded());
        assert!(report.findings.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn nameless_resource_is_skipped_before_scope_resolution() {
        let rule = Rule::default();
        let evaluator = MapEvaluator::default();
        let state = DeploymentState::default();
        let detector = Detector::build(&rule, &inventory(), &evaluator, &state);

        let mut resource = declared("web", "web-sg", Some("${aws_vpc.main.id}"));
        resource.fields.remove("name");
        let report = detector.detect_all(&[resource]);
        assert_eq!(report.checked, 1);
        assert!(report.findings.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn evaluation_failures_are_collected_as_skips() {
        let rule = Rule::default();
        let evaluator = MapEvaluator::default();
        let state = DeploymentState::default();
        let detector = Detector::build(&rule, &inventory(), &evaluator, &state);

        let report = detector.detect_all(&[
            declared("a", "${var.missing}", None),
            declared("b", "web-sg", Some("${aws_vpc.main.id}")),
            declared("c", "web-sg", None),
        ]);
        assert_eq!(report.checked, 3);
        assert_eq!(report.findings.len(), 1);
        assert!(matches!(
            report.skipped.as_slice(),
            [
                SkipReason::NameEvaluation { .. },
                SkipReason::ScopeResolution { .. }
            ]
        ));
    }
}

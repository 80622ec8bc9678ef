//! Orchestration for `dupscope check`.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use crate::core::types::Finding;
use crate::detector::Detector;
use crate::io::config::load_config;
use crate::io::expr::VariableEvaluator;
use crate::io::inventory::SnapshotInventory;
use crate::io::resources::load_resources;
use crate::io::state::load_state;

/// Inputs of a detection pass.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    /// Declared resources document.
    pub resources_path: PathBuf,
    /// Live inventory snapshot. Required when deep checking is enabled.
    pub inventory_path: Option<PathBuf>,
    /// Deployment state; a missing file is an empty state.
    pub state_path: Option<PathBuf>,
    /// Variables for `${var.NAME}` interpolation.
    pub vars_path: Option<PathBuf>,
    pub config_path: PathBuf,
    /// Enable deep checking regardless of config.
    pub deep: bool,
}

/// How far the detection pass got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Complete,
    /// The inventory could not be read; findings may be under-reported.
    Degraded { reason: String },
    /// Deep checking is off; the inventory was not queried.
    DeepCheckDisabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: RunStatus,
    pub findings: Vec<Finding>,
    /// Resources of the target kind that were considered.
    pub checked: usize,
    /// Resources skipped because an expression could not be evaluated.
    pub skipped: usize,
}

/// Run one detection pass over the declared resources.
pub fn run_check(request: &CheckRequest) -> Result<CheckOutcome> {
    let cfg = load_config(&request.config_path)?;
    let resources = load_resources(&request.resources_path)?;
    let evaluator = match &request.vars_path {
        Some(path) => VariableEvaluator::from_file(path)?,
        None => VariableEvaluator::default(),
    };
    let state = match &request.state_path {
        Some(path) => load_state(path)?,
        None => Default::default(),
    };

    if !(cfg.deep_check || request.deep) {
        info!(detector = %cfg.rule.name, "deep check disabled; inventory not queried");
        return Ok(CheckOutcome {
            status: RunStatus::DeepCheckDisabled,
            findings: Vec::new(),
            checked: 0,
            skipped: 0,
        });
    }

    let inventory_path = request
        .inventory_path
        .as_ref()
        .ok_or_else(|| anyhow!("an inventory snapshot is required for deep checks"))
        .context("check configuration")?;
    let client = SnapshotInventory::new(inventory_path);
    let detector = Detector::build(&cfg.rule, &client, &evaluator, &state);
    let report = detector.detect_all(&resources);

    let status = match detector.status().degraded_reason() {
        Some(reason) => RunStatus::Degraded {
            reason: reason.to_string(),
        },
        None => RunStatus::Complete,
    };
    Ok(CheckOutcome {
        status,
        findings: report.findings,
        checked: report.checked,
        skipped: report.skipped.len(),
    })
}

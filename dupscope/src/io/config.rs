//! Detector configuration stored in `.dupscope.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::rule::Rule;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".dupscope.toml";

/// Detector configuration (TOML).
///
/// Missing fields default to the security group rule with deep checking off.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DetectorConfig {
    /// Query the live environment. Checks needing the inventory only run when set.
    pub deep_check: bool,

    pub rule: Rule,
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        self.rule.validate()
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DetectorConfig::default()`.
pub fn load_config(path: &Path) -> Result<DetectorConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        let cfg = DetectorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DetectorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &DetectorConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

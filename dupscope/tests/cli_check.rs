//! CLI tests for `dupscope check` and `dupscope init`.
//!
//! Spawns the binary and verifies exit codes and rendered output for clean,
//! colliding, and degraded runs.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use dupscope::core::types::Finding;
use dupscope::exit_codes;
use dupscope::io::config::{DEFAULT_CONFIG_FILE, load_config};

const RESOURCES: &str = r#"{
    "resources": [
        {
            "kind": "aws_security_group",
            "id": "web",
            "file": "network.tf",
            "fields": {"name": {"value": "${var.prefix}-sg", "line": 4}}
        },
        {
            "kind": "aws_security_group",
            "id": "other",
            "file": "network.tf",
            "fields": {
                "name": {"value": "web-sg", "line": 11},
                "vpc_id": {"value": "vpc-2", "line": 12}
            }
        },
        {
            "kind": "aws_instance",
            "id": "app",
            "file": "compute.tf",
            "fields": {"name": {"value": "web-sg", "line": 1}}
        }
    ]
}"#;

const INVENTORY: &str = r#"{
    "resources": [{"name": "web-sg", "scope": "vpc-1"}, {"name": "legacy", "scope": null}],
    "account_attributes": [{"name": "default-vpc", "values": ["vpc-1"]}]
}"#;

fn write_inputs(root: &Path) {
    fs::write(root.join("resources.json"), RESOURCES).expect("write resources");
    fs::write(root.join("inventory.json"), INVENTORY).expect("write inventory");
    fs::write(root.join("vars.toml"), "prefix = \"web\"\n").expect("write vars");
}

fn check(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dupscope"))
        .current_dir(root)
        .args([
            "check",
            "--resources",
            "resources.json",
            "--inventory",
            "inventory.json",
            "--vars",
            "vars.toml",
            "--state",
            "state.json",
        ])
        .args(extra)
        .output()
        .expect("dupscope check")
}

#[test]
fn collision_exits_with_findings_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_inputs(temp.path());

    let output = check(temp.path(), &["--deep"]);
    assert_eq!(output.status.code(), Some(exit_codes::FINDINGS));
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert_eq!(
        stdout,
        "network.tf:4: error: \"web-sg\" is duplicate name. It must be unique. \
         (aws_security_group_duplicate_name)\n"
    );
}

#[test]
fn tracked_resource_exits_ok() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_inputs(temp.path());
    fs::write(
        temp.path().join("state.json"),
        r#"{"resources":[{"kind":"aws_security_group","id":"web","attributes":{"name":"web-sg","vpc_id":"vpc-1"}}]}"#,
    )
    .expect("write state");

    let output = check(temp.path(), &["--deep"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(output.stdout.is_empty());
}

#[test]
fn json_format_lists_findings() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_inputs(temp.path());

    let output = check(temp.path(), &["--deep", "--format", "json"]);
    assert_eq!(output.status.code(), Some(exit_codes::FINDINGS));
    let findings: Vec<Finding> = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].file, "network.tf");
    assert_eq!(findings[0].line, 4);
}

#[test]
fn broken_inventory_warns_and_exits_ok() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_inputs(temp.path());
    fs::write(temp.path().join("inventory.json"), "not json").expect("corrupt inventory");

    let output = check(temp.path(), &["--deep"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("under-reported"));
}

#[test]
fn deep_check_enabled_from_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_inputs(temp.path());
    fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "deep_check = true\n").expect("write config");

    let output = check(temp.path(), &[]);
    assert_eq!(output.status.code(), Some(exit_codes::FINDINGS));
}

#[test]
fn without_deep_check_nothing_is_reported() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_inputs(temp.path());

    let output = check(temp.path(), &[]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_resources_exit_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_inputs(temp.path());
    fs::write(temp.path().join("resources.json"), r#"{"resources":[{"id":"x"}]}"#)
        .expect("write resources");

    let output = check(temp.path(), &["--deep"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
}

#[test]
fn init_writes_default_config_once() {
    let temp = tempfile::tempdir().expect("tempdir");
    let run_init = |force: bool| {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dupscope"));
        cmd.current_dir(temp.path()).arg("init");
        if force {
            cmd.arg("--force");
        }
        cmd.status().expect("dupscope init")
    };

    assert_eq!(run_init(false).code(), Some(exit_codes::OK));
    let cfg = load_config(&temp.path().join(DEFAULT_CONFIG_FILE)).expect("load config");
    assert_eq!(cfg.rule.target, "aws_security_group");

    assert_eq!(run_init(false).code(), Some(exit_codes::INVALID));
    assert_eq!(run_init(true).code(), Some(exit_codes::OK));
}

//! Duplicate name checker for declared infrastructure resources.
//!
//! Compares declared resources against a snapshot of the live environment
//! and reports names already taken within the same scope.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use dupscope::check::{CheckRequest, RunStatus, run_check};
use dupscope::exit_codes;
use dupscope::io::config::{DEFAULT_CONFIG_FILE, DetectorConfig, write_config};
use dupscope::io::report::{OutputFormat, render_findings};
use dupscope::logging;

#[derive(Parser)]
#[command(
    name = "dupscope",
    version,
    about = "Detect resource names already taken in their scope"
)]
struct Cli {
    /// Config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default config file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Check declared resources for duplicate names.
    Check {
        /// Declared resources (JSON).
        #[arg(long)]
        resources: PathBuf,
        /// Snapshot of the live environment (JSON).
        #[arg(long)]
        inventory: Option<PathBuf>,
        /// Deployment state (JSON). Missing file means nothing deployed yet.
        #[arg(long)]
        state: Option<PathBuf>,
        /// Variables for `${var.NAME}` interpolation (TOML).
        #[arg(long)]
        vars: Option<PathBuf>,
        /// Query the inventory even if `deep_check` is off in config.
        #[arg(long)]
        deep: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Check {
            resources,
            inventory,
            state,
            vars,
            deep,
            format,
        } => {
            let request = CheckRequest {
                resources_path: resources,
                inventory_path: inventory,
                state_path: state,
                vars_path: vars,
                config_path: cli.config,
                deep,
            };
            cmd_check(&request, format)
        }
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    if !force && config_path.exists() {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    write_config(config_path, &DetectorConfig::default())?;
    println!("wrote {}", config_path.display());
    Ok(exit_codes::OK)
}

fn cmd_check(request: &CheckRequest, format: OutputFormat) -> Result<i32> {
    let outcome = run_check(request)?;
    match &outcome.status {
        RunStatus::Complete => {}
        RunStatus::Degraded { reason } => {
            eprintln!("warning: duplicate name check incomplete, results may be under-reported");
            eprintln!("warning: {reason}");
        }
        RunStatus::DeepCheckDisabled => {
            eprintln!("warning: deep check disabled; enable `deep_check` or pass --deep");
        }
    }
    if outcome.skipped > 0 {
        eprintln!(
            "warning: {} resource(s) skipped because an expression could not be evaluated",
            outcome.skipped
        );
    }

    print!("{}", render_findings(&outcome.findings, format)?);
    if outcome.findings.is_empty() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::FINDINGS)
    }
}

//! Stderr diagnostics for a `dupscope` run.
//!
//! Findings are rendered by `io::report` to stdout and never pass through
//! tracing. What does go through it:
//!
//! - `warn`: inventory fetch failures (the run is degraded) and resources
//!   skipped because a scope or name expression failed to evaluate.
//! - `info`: per-pass totals and a disabled deep check.
//! - `debug`: index size after the build phase and per-resource decisions
//!   (no name, unknown scope, own state match, finding).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "warn";

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber: `RUST_LOG` filter, compact lines on stderr.
///
/// To see why a resource was not flagged:
/// ```bash
/// RUST_LOG=dupscope=debug dupscope check --deep --resources resources.json --inventory inventory.json
/// ```
pub fn init() {
    tracing_subscriber::registry()
        .with(filter_from_env())
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_is_a_valid_filter() {
        let filter = EnvFilter::try_new(DEFAULT_DIRECTIVE).expect("parse default directive");
        assert_eq!(filter.to_string(), DEFAULT_DIRECTIVE);
    }
}

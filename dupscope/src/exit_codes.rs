//! Stable exit codes for dupscope CLI commands.

/// Command succeeded and no duplicate names were found.
pub const OK: i32 = 0;
/// Command failed due to invalid input, config, or other errors.
pub const INVALID: i32 = 1;
/// `dupscope check` reported at least one finding.
pub const FINDINGS: i32 = 2;

//! Rendering of findings for the terminal.

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::core::types::Finding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `file:line: severity: message (detector)` line per finding.
    Text,
    /// Pretty-printed JSON array.
    Json,
}

/// Render findings sorted by file, line and message.
pub fn render_findings(findings: &[Finding], format: OutputFormat) -> Result<String> {
    let mut sorted: Vec<&Finding> = findings.iter().collect();
    sorted.sort_by(|a, b| (&a.file, a.line, &a.message).cmp(&(&b.file, b.line, &b.message)));

    match format {
        OutputFormat::Text => Ok(sorted
            .iter()
            .map(|finding| {
                format!(
                    "{}:{}: {}: {} ({})\n",
                    finding.file, finding.line, finding.severity, finding.message, finding.detector
                )
            })
            .collect()),
        OutputFormat::Json => {
            let mut payload =
                serde_json::to_string_pretty(&sorted).context("serialize findings json")?;
            payload.push('\n');
            Ok(payload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Severity;

    fn finding(file: &str, line: u32, name: &str) -> Finding {
        Finding {
            detector: "aws_security_group_duplicate_name".to_string(),
            severity: Severity::Error,
            message: format!("\"{name}\" is duplicate name. It must be unique."),
            line,
            file: file.to_string(),
        }
    }

    #[test]
    fn text_lines_are_sorted_by_location() {
        let out = render_findings(
            &[finding("main.tf", 9, "b"), finding("main.tf", 2, "a")],
            OutputFormat::Text,
        )
        .expect("render");
        assert_eq!(
            out,
            "main.tf:2: error: \"a\" is duplicate name. It must be unique. (aws_security_group_duplicate_name)\n\
             main.tf:9: error: \"b\" is duplicate name. It must be unique. (aws_security_group_duplicate_name)\n"
        );
    }

    #[test]
    fn json_is_an_array_of_findings() {
        let out = render_findings(&[finding("main.tf", 2, "a")], OutputFormat::Json).expect("render");
        let parsed: Vec<Finding> = serde_json::from_str(&out).expect("parse");
        assert_eq!(parsed, vec![finding("main.tf", 2, "a")]);
    }

    #[test]
    fn no_findings_renders_empty_text() {
        assert_eq!(render_findings(&[], OutputFormat::Text).expect("render"), "");
    }
}

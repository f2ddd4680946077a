//! `stamp check` command implementation.
//!
//! Loads a configuration file and reports signer/verifier inconsistencies.

use anyhow::{Context, Result};
use stamp_core::{ConfigIssue, StampConfig};
use std::path::Path;

/// Render findings one per line, errors first.
fn render(path: &Path, issues: &[ConfigIssue]) -> String {
    if issues.is_empty() {
        return format!("✔ {} is valid", path.display());
    }

    let mut sorted: Vec<&ConfigIssue> = issues.iter().collect();
    sorted.sort_by(|a, b| b.severity.cmp(&a.severity));

    sorted
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check a configuration file. Fails if any finding is an error.
pub fn run(path: &Path) -> Result<String> {
    let config = StampConfig::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let issues = config.validate();
    let report = render(path, &issues);

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        anyhow::bail!("{report}\n{errors} error(s) in {}", path.display());
    }

    Ok(report)
}

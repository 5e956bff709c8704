//! `teampulse apply` command.
//!
//! Reads a YAML list of intents and applies them in order. A failing intent
//! is reported and skipped; the rest of the script still runs.

use std::path::Path;

use tracing::warn;

use crate::intent::{Dashboard, Intent};

/// Result of applying one scripted intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// The intent's `op` tag.
    pub op: &'static str,
    /// `None` on success, the error message otherwise.
    pub error: Option<String>,
}

/// Execute the `apply` command.
///
/// # Errors
///
/// Returns an error string if the script cannot be read or parsed, or the
/// final state cannot be serialized.
pub fn run(dashboard: &mut Dashboard, script: &Path, json: bool) -> Result<(), String> {
    let content = std::fs::read_to_string(script)
        .map_err(|e| format!("Failed to read script {}: {e}", script.display()))?;
    let intents = parse_script(&content)
        .map_err(|e| format!("Failed to parse script {}: {e}", script.display()))?;

    let reports = apply_all(dashboard, intents);
    println!("{}", format_report(&reports));

    if json {
        let snapshot = serde_json::to_string_pretty(&dashboard.snapshot())
            .map_err(|e| format!("Failed to serialize snapshot: {e}"))?;
        println!("{snapshot}");
    }
    Ok(())
}

/// Parses a script: a YAML sequence of tagged intents.
///
/// # Errors
///
/// Returns the YAML error for malformed scripts or unknown fields.
pub fn parse_script(content: &str) -> Result<Vec<Intent>, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Applies each intent in order, continuing past failures.
pub fn apply_all(dashboard: &mut Dashboard, intents: Vec<Intent>) -> Vec<StepReport> {
    intents
        .into_iter()
        .enumerate()
        .map(|(index, intent)| {
            let op = intent.name();
            let error = dashboard.apply(intent).err().map(|e| {
                warn!(step = index + 1, op, error = %e, "intent failed");
                e.to_string()
            });
            StepReport { op, error }
        })
        .collect()
}

/// Formats one line per step plus a summary line.
#[must_use]
pub fn format_report(reports: &[StepReport]) -> String {
    let mut lines: Vec<String> = reports
        .iter()
        .enumerate()
        .map(|(i, r)| match &r.error {
            None => format!("{:>3}. [ok]    {}", i + 1, r.op),
            Some(e) => format!("{:>3}. [error] {}: {e}", i + 1, r.op),
        })
        .collect();
    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    lines.push(String::new());
    lines.push(format!("{} intent(s) applied, {failed} failed.", reports.len() - failed));
    lines.join("\n")
}

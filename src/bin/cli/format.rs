//! Output formatting for CLI results
//!
//! Formats run outcomes and change sets as human-readable text or JSON. SARIF
//! serialization lives in the library's `sarif` adapter.

use clarity_model_check::diff::ChangedFunction;
use clarity_model_check::pipeline::RunOutcome;

/// Format a full run outcome as human-readable text.
pub fn format_outcome_human(outcome: &RunOutcome) -> String {
    let mut output = String::new();

    output.push_str("=== Clarity Model Check ===\n\n");

    if !outcome.changes.is_empty() {
        output.push_str("Changed functions:\n");
        for change in &outcome.changes {
            output.push_str(&format!(
                "  {:<9} {} ({}:{}-{})\n",
                change.change.as_str(),
                change.definition.name,
                change.definition.file.display(),
                change.definition.start_line,
                change.definition.end_line
            ));
        }
        output.push('\n');
    }

    if !outcome.findings.is_empty() {
        output.push_str("Findings:\n");
        for finding in &outcome.findings {
            output.push_str(&format!(
                "  [{}] {}:{} {}\n",
                finding.category.id(),
                finding.file.display(),
                finding.line,
                finding.message
            ));
        }
        output.push('\n');
    }

    output.push_str(&outcome.summary);
    output.push_str(&format!("\nStatus: {}\n", outcome.status.as_str()));
    output
}

/// Format a full run outcome as JSON.
pub fn format_outcome_json(outcome: &RunOutcome) -> String {
    let output = serde_json::json!({
        "status": outcome.status.as_str(),
        "summary": outcome.summary,
        "changes": changes_json(&outcome.changes),
        "results": outcome.results.iter().map(|r| serde_json::json!({
            "file": r.file.display().to_string(),
            "function": r.function_name,
            "verified": r.verified,
            "failures": r.failures.iter().map(|f| serde_json::json!({
                "function": f.function_name,
                "line": f.line,
                "title": f.title,
                "failing_code": f.failing_code,
            })).collect::<Vec<_>>(),
        })).collect::<Vec<_>>(),
        "findings": outcome.findings.iter().map(|f| serde_json::json!({
            "category": f.category.id(),
            "message": f.message,
            "file": f.file.display().to_string(),
            "line": f.line,
        })).collect::<Vec<_>>(),
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Format a bare change set as human-readable text.
pub fn format_changes_human(changes: &[ChangedFunction]) -> String {
    if changes.is_empty() {
        return "No function changes detected.\n".to_string();
    }

    let mut output = String::new();
    for change in changes {
        output.push_str(&format!(
            "{:<9} {} {} ({}:{}-{})\n",
            change.change.as_str(),
            change.definition.kind.as_str(),
            change.definition.name,
            change.definition.file.display(),
            change.definition.start_line,
            change.definition.end_line
        ));
    }
    output
}

/// Format a bare change set as JSON.
pub fn format_changes_json(changes: &[ChangedFunction]) -> String {
    serde_json::to_string_pretty(&changes_json(changes)).unwrap_or_else(|_| "[]".to_string())
}

fn changes_json(changes: &[ChangedFunction]) -> serde_json::Value {
    serde_json::Value::Array(
        changes
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.definition.name,
                    "kind": c.definition.kind.as_str(),
                    "change": c.change.as_str(),
                    "file": c.definition.file.display().to_string(),
                    "start_line": c.definition.start_line,
                    "end_line": c.definition.end_line,
                })
            })
            .collect(),
    )
}

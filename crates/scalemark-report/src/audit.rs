//! Calibration audit output for CI consumers.
//!
//! Renders form audits as markdown for humans and as a JSON document for
//! pipelines that gate calibration changes on a clean audit.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use scalemark_forms::FormAudit;

/// Render one form audit as markdown.
pub fn generate_audit_markdown(audit: &FormAudit) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Calibration audit — {}\n\n", audit.form_id));
    if audit.is_valid() {
        md.push_str("No issues found.\n");
        return md;
    }

    md.push_str(&format!("{} issue(s) found.\n\n", audit.issue_count()));
    for line in audit.issue_lines() {
        md.push_str(&format!("- {line}\n"));
    }
    md
}

/// Generate a JSON audit document covering one validation run.
pub fn generate_audit_json(audits: &[FormAudit]) -> serde_json::Value {
    json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "valid": audits.iter().all(|a| a.is_valid()),
        "total_issues": audits.iter().map(|a| a.issue_count()).sum::<usize>(),
        "forms": audits,
    })
}

/// Write a JSON audit document to a file.
pub fn write_audit_json(audits: &[FormAudit], path: &Path) -> Result<()> {
    let document = generate_audit_json(audits);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, json)?;
    Ok(())
}

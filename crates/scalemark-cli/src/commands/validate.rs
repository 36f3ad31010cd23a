//! The `scalemark validate` command.

use std::path::PathBuf;

use anyhow::Result;

use scalemark_forms::{audit_form, load_form_directory, parse_form};
use scalemark_report::write_audit_json;

pub fn execute(forms_path: PathBuf, audit_json: Option<PathBuf>) -> Result<()> {
    let forms = if forms_path.is_dir() {
        load_form_directory(&forms_path)?
    } else {
        vec![parse_form(&forms_path)?]
    };
    anyhow::ensure!(
        !forms.is_empty(),
        "no form files found in {}",
        forms_path.display()
    );

    let mut audits = Vec::new();
    for form in &forms {
        println!(
            "Form: {} v{} ({} sections, {} bands)",
            form.id,
            form.version,
            form.sections.len(),
            form.bands.len()
        );

        let audit = audit_form(form);
        for line in audit.issue_lines() {
            println!("  ISSUE: {line}");
        }
        audits.push(audit);
    }

    if let Some(path) = &audit_json {
        write_audit_json(&audits, path)?;
        eprintln!("Audit JSON: {}", path.display());
    }

    let total_issues: usize = audits.iter().map(|a| a.issue_count()).sum();
    if total_issues == 0 {
        println!("All forms valid.");
    } else {
        println!();
        anyhow::bail!("{total_issues} issue(s) found");
    }

    Ok(())
}

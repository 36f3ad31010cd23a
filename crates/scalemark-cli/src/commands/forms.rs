//! The `scalemark forms` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use scalemark_forms::audit_form;

use super::load_registry;

pub fn execute(forms_dir: Option<PathBuf>) -> Result<()> {
    let registry = load_registry(forms_dir.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec![
        "Id", "Name", "Version", "Sections", "Max score", "Status",
    ]);

    for form in registry.forms() {
        let audit = audit_form(form);
        let status = if audit.is_valid() {
            "ok".to_string()
        } else {
            format!("{} issue(s)", audit.issue_count())
        };
        table.add_row(vec![
            Cell::new(&form.id),
            Cell::new(&form.name),
            Cell::new(&form.version),
            Cell::new(form.sections.len()),
            Cell::new(form.max_composite()),
            Cell::new(status),
        ]);
    }

    println!("{table}");
    Ok(())
}

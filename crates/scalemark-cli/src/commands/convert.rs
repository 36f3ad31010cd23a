//! The `scalemark convert` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use scalemark_core::convert::ScoreConverter;
use scalemark_core::table::CalibrationTable;

use super::{load_registry, resolve_form};

pub fn execute(
    form_ref: String,
    section: String,
    raw: i32,
    forms_dir: Option<PathBuf>,
) -> Result<()> {
    let registry = load_registry(forms_dir.as_deref())?;
    let form = resolve_form(&registry, &form_ref)?;

    let form_section = form
        .sections
        .iter()
        .find(|s| s.id == section)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "section '{}' not in form '{}'. Available: {:?}",
                section,
                form.id,
                form.sections.iter().map(|s| s.id.as_str()).collect::<Vec<_>>()
            )
        })?;

    let table = CalibrationTable::new(form_section.spec, &form_section.entries)
        .with_context(|| format!("section '{section}' failed its calibration audit"))?;
    let converter = ScoreConverter::new(form_section.id.clone(), table);

    let conversion = converter.convert(raw);
    println!("{section}: raw {raw} -> scaled {}", conversion.scaled);
    if let Some(diagnostic) = &conversion.clamp {
        println!("note: {diagnostic}");
    }

    Ok(())
}

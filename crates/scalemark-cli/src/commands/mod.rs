//! Subcommand implementations.

use std::path::Path;

use anyhow::Result;

use scalemark_forms::{parse_form, FormRegistry, TestForm};

pub mod compare;
pub mod convert;
pub mod forms;
pub mod init;
pub mod score;
pub mod validate;

/// Registry seeded with the embedded reference form, plus any forms from
/// `forms_dir`.
pub(crate) fn load_registry(forms_dir: Option<&Path>) -> Result<FormRegistry> {
    let mut registry = FormRegistry::with_reference()?;
    if let Some(dir) = forms_dir {
        let loaded = registry.load_directory(dir)?;
        tracing::info!("loaded {} form(s) from {}", loaded, dir.display());
    }
    Ok(registry)
}

/// Resolves `--form` as a file path when it names a `.toml` file, otherwise
/// as a registry id.
pub(crate) fn resolve_form(registry: &FormRegistry, form_ref: &str) -> Result<TestForm> {
    let path = Path::new(form_ref);
    if path.extension().is_some_and(|ext| ext == "toml") {
        return parse_form(path);
    }
    registry.get(form_ref).cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "form '{}' not found. Available: {:?}",
            form_ref,
            registry
                .forms()
                .iter()
                .map(|f| f.id.as_str())
                .collect::<Vec<_>>()
        )
    })
}

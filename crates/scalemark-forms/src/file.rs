//! TOML calibration form files.
//!
//! Loads test forms from TOML files and directories. Parsing only checks
//! shape; calibration invariants are enforced separately by the audit gate
//! in [`crate::audit`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scalemark_core::model::Band;
use scalemark_core::table::TableSpec;

/// A complete calibration form: sections plus the band scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestForm {
    pub id: String,
    pub name: String,
    /// Calibration version, bumped whenever the tables change.
    pub version: String,
    pub sections: Vec<FormSection>,
    pub bands: Vec<Band>,
}

impl TestForm {
    /// Highest composite this form's sections can produce.
    pub fn max_composite(&self) -> i32 {
        self.sections.iter().map(|s| s.spec.max_scaled).sum()
    }
}

/// One section's calibration data as it appears in a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    pub id: String,
    pub name: String,
    pub spec: TableSpec,
    pub entries: Vec<(i32, i32)>,
}

/// Intermediate TOML structure for parsing form files.
#[derive(Debug, Deserialize)]
struct TomlFormFile {
    form: TomlFormHeader,
    #[serde(default)]
    sections: Vec<TomlSection>,
    #[serde(default)]
    bands: Vec<Band>,
}

#[derive(Debug, Deserialize)]
struct TomlFormHeader {
    id: String,
    name: String,
    #[serde(default = "default_version")]
    version: String,
}

fn default_version() -> String {
    "1".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlSection {
    id: String,
    #[serde(default)]
    name: String,
    max_raw: i32,
    #[serde(default)]
    min_scaled: i32,
    max_scaled: i32,
    #[serde(default)]
    entries: Vec<(i32, i32)>,
}

/// Parse a single TOML file into a `TestForm`.
pub fn parse_form(path: &Path) -> Result<TestForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form file: {}", path.display()))?;

    parse_form_str(&content, path)
}

/// Parse a TOML string into a `TestForm` (useful for testing).
pub fn parse_form_str(content: &str, source_path: &Path) -> Result<TestForm> {
    let parsed: TomlFormFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let sections = parsed
        .sections
        .into_iter()
        .map(|s| {
            let name = if s.name.is_empty() {
                s.id.clone()
            } else {
                s.name
            };
            FormSection {
                id: s.id,
                name,
                spec: TableSpec {
                    max_raw: s.max_raw,
                    min_scaled: s.min_scaled,
                    max_scaled: s.max_scaled,
                },
                entries: s.entries,
            }
        })
        .collect();

    Ok(TestForm {
        id: parsed.form.id,
        name: parsed.form.name,
        version: parsed.form.version,
        sections,
        bands: parsed.bands,
    })
}

/// Recursively load all `.toml` form files from a directory.
///
/// Files that fail to parse are skipped with a warning so one bad file does
/// not block the rest of the directory.
pub fn load_form_directory(dir: &Path) -> Result<Vec<TestForm>> {
    let mut forms = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            forms.extend(load_form_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_form(&path) {
                Ok(form) => forms.push(form),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(forms)
}

//! Registry of loaded test forms, keyed by form id.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::file::{load_form_directory, TestForm};
use crate::reference::reference_form;

/// Holds every form known to the current invocation.
///
/// Later registrations win on id collision, so a directory load can shadow
/// the built-in reference form with a corrected copy.
#[derive(Debug, Default)]
pub struct FormRegistry {
    forms: HashMap<String, TestForm>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the embedded reference form.
    pub fn with_reference() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(reference_form()?);
        Ok(registry)
    }

    pub fn register(&mut self, form: TestForm) {
        if let Some(previous) = self.forms.insert(form.id.clone(), form) {
            tracing::warn!("form '{}' replaced an earlier registration", previous.id);
        }
    }

    /// Loads every `.toml` form under `dir` into the registry.
    ///
    /// Returns how many forms were registered.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        let forms = load_form_directory(dir)?;
        let count = forms.len();
        for form in forms {
            self.register(form);
        }
        Ok(count)
    }

    pub fn get(&self, id: &str) -> Option<&TestForm> {
        self.forms.get(id)
    }

    /// All registered forms, ordered by id for stable listings.
    pub fn forms(&self) -> Vec<&TestForm> {
        let mut forms: Vec<&TestForm> = self.forms.values().collect();
        forms.sort_by(|a, b| a.id.cmp(&b.id));
        forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::REFERENCE_FORM_ID;

    const SMALL_FORM: &str = r#"
[form]
id = "quiz-1"
name = "Quiz One"

[[sections]]
id = "listening"
max_raw = 1
max_scaled = 10
entries = [[0, 0], [1, 10]]

[[bands]]
threshold = 0
label = "All"
"#;

    #[test]
    fn seeded_registry_resolves_the_reference_form() {
        let registry = FormRegistry::with_reference().unwrap();
        assert_eq!(registry.len(), 1);
        let form = registry.get(REFERENCE_FORM_ID).unwrap();
        assert_eq!(form.sections.len(), 2);
        assert!(registry.get("no-such-form").is_none());
    }

    #[test]
    fn directory_load_registers_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quiz.toml"), SMALL_FORM).unwrap();

        let mut registry = FormRegistry::with_reference().unwrap();
        let loaded = registry.load_directory(dir.path()).unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("quiz-1").is_some());
    }

    #[test]
    fn later_registration_shadows_earlier() {
        let mut registry = FormRegistry::new();
        let mut form = crate::file::parse_form_str(
            SMALL_FORM,
            &std::path::PathBuf::from("test.toml"),
        )
        .unwrap();
        registry.register(form.clone());

        form.name = "Quiz One, revised".to_string();
        registry.register(form);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("quiz-1").unwrap().name, "Quiz One, revised");
    }

    #[test]
    fn listing_is_ordered_by_id() {
        let mut registry = FormRegistry::with_reference().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quiz.toml"), SMALL_FORM).unwrap();
        registry.load_directory(dir.path()).unwrap();

        let ids: Vec<&str> = registry.forms().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["quiz-1", REFERENCE_FORM_ID]);
    }
}
